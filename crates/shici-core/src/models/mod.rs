//! Searchable documents of the poetry archive.

pub mod poem;
pub mod poet;

pub use poem::PoemDocument;
pub use poet::PoetDocument;
