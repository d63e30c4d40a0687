use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid document id: {0:?}")]
    InvalidId(String),

    #[error("invalid schema for document type {type_name:?}: {reason}")]
    InvalidSchema { type_name: String, reason: String },
}
