//! shici-search
//!
//! Search engine client: query construction, index mappings, typed decoding
//! of hit envelopes, and the `Searcher` facade over index and document
//! operations.

pub mod config;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod index;
pub mod mapping;
pub mod mutate;
pub mod query;
pub mod response;
pub mod searcher;

pub use config::SearchConfig;
pub use decoder::DecoderRegistry;
pub use error::{ErrorKind, SearchError};
pub use query::QueryBuilder;
pub use searcher::Searcher;
