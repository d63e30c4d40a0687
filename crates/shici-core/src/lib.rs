//! shici-core
//!
//! Searchable document vocabulary, id conventions, and search engine path layout.
//! No HTTP dependency; shared by the other shici crates.

pub mod document;
pub mod error;
pub mod ids;
pub mod models;
pub mod paths;
