use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shici_transport::{RawResponse, TransportError};
use tracing::{debug, info};

use crate::error::SearchError;

/// Error body the engine sends with a non-2xx status.
///
/// `error` is a plain string on older engines and an object with `type` and
/// `reason` on newer ones.
#[derive(Debug, Default, Deserialize)]
pub struct EngineErrorBody {
    pub status: Option<u16>,
    pub error: Option<Value>,
}

/// Decode a 2xx body into `R`, or turn a non-2xx response into
/// [`SearchError::Engine`].
pub fn decode_response<R: DeserializeOwned>(resp: &RawResponse) -> Result<R, SearchError> {
    check_response(resp)?;
    parse_body(&resp.body)
}

/// `Ok` for 2xx, the engine's error otherwise.
pub fn check_response(resp: &RawResponse) -> Result<(), SearchError> {
    if resp.is_success() {
        debug!(status = resp.status, body = %resp.body, "engine response");
        Ok(())
    } else {
        info!(status = resp.status, body = %resp.body, "engine error response");
        Err(engine_error(resp))
    }
}

/// Decode a success body. A body that does not match is a malformed
/// response, not an engine error.
pub fn parse_body<R: DeserializeOwned>(body: &str) -> Result<R, SearchError> {
    serde_json::from_str(body)
        .map_err(|e| TransportError::MalformedResponse(e.to_string()).into())
}

/// Build the engine error for a non-2xx response.
pub fn engine_error(resp: &RawResponse) -> SearchError {
    let text = resp.body.trim();
    let text = if text.is_empty() { "{}" } else { text };

    let parsed: EngineErrorBody = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(_) => {
            return SearchError::Engine {
                status: resp.status,
                kind: None,
                message: text.to_string(),
            };
        }
    };

    let status = parsed.status.unwrap_or(resp.status);
    let (kind, message) = match parsed.error {
        Some(Value::String(msg)) => (None, msg),
        Some(Value::Object(obj)) => {
            let kind = obj.get("type").and_then(Value::as_str).map(str::to_string);
            let message = obj
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| kind.clone())
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string());
            (kind, message)
        }
        Some(other) => (None, other.to_string()),
        None => (None, format!("engine returned status {}", resp.status)),
    };

    SearchError::Engine {
        status,
        kind,
        message,
    }
}
