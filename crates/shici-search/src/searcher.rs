use std::sync::Arc;

use serde::de::DeserializeOwned;
use shici_core::document::Searchable;
use shici_core::{ids, paths};
use shici_transport::{Method, RawResponse, Transport};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::decoder::DecoderRegistry;
use crate::envelope::Hit;
use crate::error::SearchError;
use crate::query::{MAX_QUERY_TOKENS, QueryBuilder, passes_min_score};
use crate::response::{check_response, decode_response};

/// Decides whether a document id may be sent to the engine.
pub type IdValidator = dyn Fn(&str) -> bool + Send + Sync;

/// Search engine facade: typed search plus index and document operations.
///
/// Every operation is one blocking request. `Searcher` is `Send + Sync`;
/// share it behind an `Arc`.
pub struct Searcher {
    transport: Arc<dyn Transport>,
    decoders: Arc<DecoderRegistry>,
    min_score: f64,
    id_validator: Arc<IdValidator>,
}

impl Searcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        decoders: Arc<DecoderRegistry>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            transport,
            decoders,
            min_score: config.min_score,
            id_validator: Arc::new(ids::is_valid_id),
        }
    }

    /// HTTP transport and a fresh decoder registry, both from `config`.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let transport = config.build_transport()?;
        info!(url = %transport.base_url(), "search engine configured");
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(DecoderRegistry::new()),
            config,
        ))
    }

    /// Replace the default id check ([`ids::is_valid_id`]). Empty ids are
    /// rejected regardless.
    pub fn with_id_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.id_validator = Arc::new(validator);
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn decoders(&self) -> &Arc<DecoderRegistry> {
        &self.decoders
    }

    /// Search `index` for documents of type `T`.
    ///
    /// Returns at most `max_results` documents in engine relevance order,
    /// keeping only hits scored above the minimum score. An empty token list
    /// returns nothing without contacting the engine.
    pub fn search<T, S>(
        &self,
        index: &str,
        tokens: &[S],
        max_results: usize,
    ) -> Result<Vec<T>, SearchError>
    where
        T: Searchable,
        S: AsRef<str>,
    {
        let hits = self.search_hits::<T, S>(index, tokens, max_results)?;
        Ok(hits.into_iter().map(|hit| hit.document).collect())
    }

    /// Like [`Searcher::search`], keeping each hit's id and score.
    pub fn search_hits<T, S>(
        &self,
        index: &str,
        tokens: &[S],
        max_results: usize,
    ) -> Result<Vec<Hit<T>>, SearchError>
    where
        T: Searchable,
        S: AsRef<str>,
    {
        self.check_index(index)?;
        if tokens.is_empty() {
            debug!(index, doc_type = T::TYPE_NAME, "empty query, skipping search");
            return Ok(Vec::new());
        }
        if let Some(pos) = tokens
            .iter()
            .take(MAX_QUERY_TOKENS)
            .position(|t| t.as_ref().is_empty())
        {
            return Err(SearchError::InvalidQuery(format!("query token {pos} is empty")));
        }

        let decoder = self.decoders.hits_decoder::<T>()?;
        let fields = self.decoders.analyzed_fields::<T>();
        let request = QueryBuilder::with_fields(fields.iter().copied())
            .build_request(tokens, max_results);
        let body = serde_json::to_string(&request)?;
        info!(index, doc_type = T::TYPE_NAME, tokens = tokens.len(), "search");
        debug!(query = %body, "search request");

        let resp = self.send(Method::Post, &paths::search(index, T::TYPE_NAME), Some(body))?;
        check_response(&resp)?;

        let raw = decoder.decode_envelope(&resp.body)?;
        let total = raw.total();
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for hit in raw.hits.hits {
            if results.len() >= max_results {
                break;
            }
            if passes_min_score(hit.score, self.min_score) {
                results.push(decoder.decode_hit(hit)?);
            }
        }

        info!(
            index,
            doc_type = T::TYPE_NAME,
            total,
            returned = results.len(),
            "search complete"
        );
        Ok(results)
    }

    /// Reject index names that are not a single safe path segment.
    pub(crate) fn check_index(&self, index: &str) -> Result<(), SearchError> {
        if !paths::is_valid_segment(index) {
            return Err(SearchError::InvalidIndex(index.to_string()));
        }
        Ok(())
    }

    /// Reject ids that fail validation before any request is made.
    pub(crate) fn check_id(&self, id: &str) -> Result<(), SearchError> {
        if id.is_empty() || !(self.id_validator)(id) {
            return Err(SearchError::InvalidId(id.to_string()));
        }
        Ok(())
    }

    /// Send one request; any status comes back as a response.
    pub(crate) fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, SearchError> {
        Ok(self.transport.request(method, path, body.as_deref())?)
    }

    /// Send one request and decode a 2xx body into `R`.
    pub(crate) fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R, SearchError> {
        let resp = self.send(method, path, body)?;
        decode_response(&resp)
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("decoders", &self.decoders)
            .field("min_score", &self.min_score)
            .finish()
    }
}
