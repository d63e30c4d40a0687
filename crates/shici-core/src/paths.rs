//! Search engine path conventions.
//!
//! Pure string functions with no HTTP dependency. Paths are relative to the
//! configured engine base URL.

pub const SEARCH_ENDPOINT: &str = "_search";

pub const MAPPING_ENDPOINT: &str = "_mapping";

/// Whether `name` can stand alone as one path segment.
///
/// Leading `_` is reserved for engine endpoints (`_all`, `_search`), and
/// `.`/`..` would be resolved away by the URL layer.
pub fn is_valid_segment(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '?', '#', '%', ' '])
}

pub fn index(index: &str) -> String {
    index.to_string()
}

pub fn document(index: &str, doc_type: &str, id: &str) -> String {
    format!("{index}/{doc_type}/{id}")
}

pub fn search(index: &str, doc_type: &str) -> String {
    format!("{index}/{doc_type}/{SEARCH_ENDPOINT}")
}

pub fn mapping(index: &str, doc_type: &str) -> String {
    format!("{index}/{MAPPING_ENDPOINT}/{doc_type}")
}
