//! Query construction for short, segmented, often CJK queries.
//!
//! Each token picks a query shape by its length in characters:
//!
//! | Length | Shape |
//! |--------|-------|
//! | 1 | `term` on the catch-all field, boost 0.12 |
//! | 2–3 | `match_phrase` on the catch-all field, slop 1 |
//! | > 3 | `bool.should` of a phrase on the first 7 characters and a 75% `multi_match` |
//!
//! One token becomes the whole query. Several tokens are OR-ed in a
//! `bool.should`, using only the first three.

use serde_json::{Value, json};

/// Synthetic field holding all document text.
pub const CATCH_ALL_FIELD: &str = "_all";

/// Boost for single-character term queries, which would otherwise swamp
/// longer matches.
pub const TERM_BOOST: f64 = 0.12;

pub const PHRASE_SLOP: u32 = 1;

/// Tokens beyond this many are ignored.
pub const MAX_QUERY_TOKENS: usize = 3;

/// Long tokens are cut to this many characters before matching.
pub const MAX_PHRASE_CHARS: usize = 7;

pub const MINIMUM_SHOULD_MATCH: &str = "75%";

/// Builds engine query documents from query tokens.
///
/// Pure construction: nothing here talks to the engine.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    multi_match_fields: Vec<String>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            multi_match_fields: vec![CATCH_ALL_FIELD.to_string()],
        }
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target `fields` in the multi-match half of long-token queries instead
    /// of the catch-all field. An empty list keeps the catch-all field.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            Self::default()
        } else {
            Self {
                multi_match_fields: fields,
            }
        }
    }

    pub fn multi_match_fields(&self) -> &[String] {
        &self.multi_match_fields
    }

    /// Full search request: the query plus `from: 0` and `size: max_results`.
    pub fn build_request<S: AsRef<str>>(&self, tokens: &[S], max_results: usize) -> Value {
        let mut request = self.build_query(tokens);
        if let Some(obj) = request.as_object_mut() {
            obj.insert("from".to_string(), json!(0));
            obj.insert("size".to_string(), json!(max_results));
        }
        request
    }

    /// `{ "query": ... }` for `tokens`.
    ///
    /// Callers must not pass an empty slice or empty tokens.
    pub fn build_query<S: AsRef<str>>(&self, tokens: &[S]) -> Value {
        if tokens.len() == 1 {
            return self.build_single_query(tokens[0].as_ref());
        }
        self.build_bool_should_query(tokens)
    }

    /// `{ "query": <sub-query> }`
    pub fn build_single_query(&self, token: &str) -> Value {
        json!({ "query": self.build_sub_query(token) })
    }

    /// `{ "query": { "bool": { "should": [ ... ] } } }` over the first
    /// [`MAX_QUERY_TOKENS`] tokens.
    pub fn build_bool_should_query<S: AsRef<str>>(&self, tokens: &[S]) -> Value {
        let shoulds: Vec<Value> = tokens
            .iter()
            .take(MAX_QUERY_TOKENS)
            .map(|t| self.build_sub_query(t.as_ref()))
            .collect();
        json!({ "query": { "bool": { "should": shoulds } } })
    }

    pub fn build_sub_query(&self, token: &str) -> Value {
        match token.chars().count() {
            1 => build_term_query(token),
            2..=3 => build_phrase_query(token),
            _ => self.build_fuzzy_phrase_query(token),
        }
    }

    /// Phrase match OR a lenient multi-field match, both on the token cut to
    /// [`MAX_PHRASE_CHARS`] characters. Fuzziness is 0: the leniency comes
    /// from the minimum-should-match, not from edit distance.
    pub fn build_fuzzy_phrase_query(&self, token: &str) -> Value {
        let q = truncate_chars(token, MAX_PHRASE_CHARS);
        json!({
            "bool": {
                "should": [
                    build_phrase_query(q),
                    {
                        "multi_match": {
                            "query": q,
                            "fields": self.multi_match_fields,
                            "minimum_should_match": MINIMUM_SHOULD_MATCH,
                            "fuzziness": 0
                        }
                    }
                ]
            }
        })
    }
}

/// `{ "term": { "_all": { "value": ..., "boost": 0.12 } } }`
pub fn build_term_query(term: &str) -> Value {
    json!({ "term": { CATCH_ALL_FIELD: { "value": term, "boost": TERM_BOOST } } })
}

/// `{ "match_phrase": { "_all": { "query": ..., "slop": 1 } } }`
pub fn build_phrase_query(phrase: &str) -> Value {
    json!({ "match_phrase": { CATCH_ALL_FIELD: { "query": phrase, "slop": PHRASE_SLOP } } })
}

/// Query over the catch-all field with the default builder.
pub fn build_query<S: AsRef<str>>(tokens: &[S]) -> Value {
    QueryBuilder::default().build_query(tokens)
}

/// Keep hits whose score is strictly above `min_score`, preserving order.
/// Hits without a score never pass.
pub fn passes_min_score(score: Option<f64>, min_score: f64) -> bool {
    score.is_some_and(|s| s > min_score)
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
