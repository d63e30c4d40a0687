use thiserror::Error;

/// Failures below the engine: the request never produced a usable response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid engine URL: {0}")]
    InvalidUrl(String),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
