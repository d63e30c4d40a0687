use shici_core::document::FieldKind;
use shici_core::error::CoreError;
use shici_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("field {type_name}.{field} is analyzed but has unsupported type {kind}")]
    UnsupportedFieldType {
        type_name: String,
        field: String,
        kind: FieldKind,
    },

    #[error("invalid document id: {0:?}")]
    InvalidId(String),

    #[error("invalid index name: {0:?}")]
    InvalidIndex(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("engine error (status {status}): {message}")]
    Engine {
        status: u16,
        kind: Option<String>,
        message: String,
    },

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification callers can base retry policy on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Schema or setup mistake. Retrying cannot help.
    Configuration,
    /// The caller passed something invalid. Rejected before any I/O.
    ContractViolation,
    /// The engine answered with an error.
    Engine,
    /// No usable answer from the engine.
    Transport,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_)
            | Self::UnsupportedFieldType { .. }
            | Self::Serialization(_)
            | Self::Core(CoreError::InvalidSchema { .. }) => ErrorKind::Configuration,
            Self::InvalidId(_)
            | Self::InvalidIndex(_)
            | Self::InvalidQuery(_)
            | Self::Core(CoreError::InvalidId(_)) => ErrorKind::ContractViolation,
            Self::Engine { .. } | Self::DocumentNotFound(_) => ErrorKind::Engine,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Transport failures may succeed on a later attempt; nothing else will.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Whether the engine reported the target (index or document) missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Engine { status: 404, .. } | Self::DocumentNotFound(_))
    }
}
