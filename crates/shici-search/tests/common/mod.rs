#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use shici_core::document::{FieldKind, FieldSpec, Searchable};
use shici_search::{DecoderRegistry, SearchConfig, Searcher};
use shici_transport::{Method, RawResponse, Transport, TransportError};

/// One request as the transport saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

/// Transport that replays scripted responses and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_body_json(&self) -> serde_json::Value {
        let calls = self.calls();
        let body = calls
            .last()
            .and_then(|c| c.body.clone())
            .expect("last call had no body");
        serde_json::from_str(&body).unwrap()
    }
}

impl Transport for MockTransport {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.map(str::to_string),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Request {
                    url: path.to_string(),
                    message: "no scripted response".to_string(),
                })
            })
    }
}

pub fn searcher(mock: &Arc<MockTransport>) -> Searcher {
    Searcher::new(
        mock.clone(),
        Arc::new(DecoderRegistry::new()),
        &SearchConfig::default(),
    )
}

/// Small document type used across tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub views: i32,
    #[serde(default)]
    pub published: bool,
}

impl Article {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            views: 0,
            published: false,
        }
    }
}

impl Searchable for Article {
    const TYPE_NAME: &'static str = "Article";

    fn fields() -> &'static [FieldSpec] {
        static FIELDS: [FieldSpec; 4] = [
            FieldSpec::exact("id", FieldKind::Text),
            FieldSpec::analyzed("title", FieldKind::Text),
            FieldSpec::exact("views", FieldKind::Integer),
            FieldSpec::exact("published", FieldKind::Boolean),
        ];
        &FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Document type whose schema can never produce a decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broken {
    pub id: String,
}

impl Searchable for Broken {
    const TYPE_NAME: &'static str = "_broken";

    fn fields() -> &'static [FieldSpec] {
        static FIELDS: [FieldSpec; 1] = [FieldSpec::analyzed("flags", FieldKind::List)];
        &FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// A search response body with the given `(id, score, title)` hits.
pub fn hits_body(total: u64, hits: &[(&str, f64, &str)]) -> String {
    let hits: Vec<serde_json::Value> = hits
        .iter()
        .map(|(id, score, title)| {
            serde_json::json!({
                "_index": "shici",
                "_type": "Article",
                "_id": id,
                "_score": score,
                "_source": { "id": id, "title": title, "views": 1 }
            })
        })
        .collect();
    serde_json::json!({
        "took": 3,
        "timed_out": false,
        "hits": { "total": total, "max_score": 1.0, "hits": hits }
    })
    .to_string()
}
