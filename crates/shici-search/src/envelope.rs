//! Engine response envelopes.
//!
//! The envelope shape is the same for every document type; only `_source`
//! differs. Search responses are read in two steps (envelope first, then each
//! hit's source on demand) so hits that are filtered out are never decoded.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// `hits.total`: a bare count, or `{ "value": n, "relation": "eq" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HitTotal {
    Count(u64),
    Object { value: u64 },
}

impl HitTotal {
    pub fn value(self) -> u64 {
        match self {
            HitTotal::Count(n) | HitTotal::Object { value: n } => n,
        }
    }
}

/// One search hit with its source still undecoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// `null` when results are sorted rather than scored.
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHits {
    pub total: HitTotal,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// A search response before any hit source is decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchResponse {
    pub hits: RawHits,
}

impl RawSearchResponse {
    pub fn total(&self) -> u64 {
        self.hits.total.value()
    }
}

/// A decoded search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<T> {
    pub id: Option<String>,
    pub score: Option<f64>,
    pub document: T,
}

/// A fully decoded search response.
#[derive(Debug, Clone, PartialEq)]
pub struct HitsEnvelope<T> {
    pub total: u64,
    pub hits: Vec<Hit<T>>,
}

/// Single-document GET response.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct DocumentEnvelope<T> {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Older engines answer a missing document with `found: false` and 200.
    pub found: Option<bool>,
    #[serde(rename = "_source")]
    pub source: Option<T>,
}
