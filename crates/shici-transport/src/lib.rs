//! shici-transport
//!
//! Blocking JSON-over-HTTP requests against the search engine. Thin wrapper
//! around a `ureq` agent.

pub mod client;
pub mod error;
pub mod request;

pub use client::HttpTransport;
pub use error::TransportError;
pub use request::{Method, RawResponse, Transport};
