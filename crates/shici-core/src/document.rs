use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CoreError;
use crate::paths;

/// Value kinds a searchable field can declare.
///
/// Only the first five have an engine mapping. The rest can live on a
/// document (and round-trip through `_source`) but are never indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Timestamp,
    List,
    Object,
}

impl FieldKind {
    /// Engine type name for this kind, or `None` if the engine mapping
    /// does not support it.
    pub fn engine_type(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("text"),
            FieldKind::Integer => Some("integer"),
            FieldKind::Long => Some("long"),
            FieldKind::Float => Some("float"),
            FieldKind::Double => Some("double"),
            FieldKind::Boolean | FieldKind::Timestamp | FieldKind::List | FieldKind::Object => {
                None
            }
        }
    }

    pub fn is_supported(self) -> bool {
        self.engine_type().is_some()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Long => "long",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp",
            FieldKind::List => "list",
            FieldKind::Object => "object",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared field of a searchable document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Indexed for full-text search (tokenized, scored) rather than as an
    /// exact value.
    pub analyzed: bool,
}

impl FieldSpec {
    /// A full-text field.
    pub const fn analyzed(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            analyzed: true,
        }
    }

    /// An exact/sortable field.
    pub const fn exact(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            analyzed: false,
        }
    }
}

/// A document type that can be stored in and retrieved from a search index.
///
/// Implementors declare their schema explicitly instead of having it
/// discovered at runtime. `TYPE_NAME` is the engine document-type name and
/// appears verbatim in request paths.
pub trait Searchable: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    /// Every field that takes part in the index mapping.
    fn fields() -> &'static [FieldSpec];

    /// Externally assigned, stable document id.
    fn id(&self) -> &str;
}

/// Names of the analyzed fields of `T`, in declaration order.
pub fn analyzed_field_names<T: Searchable>() -> Vec<&'static str> {
    T::fields()
        .iter()
        .filter(|f| f.analyzed)
        .map(|f| f.name)
        .collect()
}

/// Check that `T` declares a usable schema.
///
/// The type name must be a single non-empty path segment, field names must be
/// non-empty and unique, and every analyzed field must have an engine mapping.
pub fn validate_schema<T: Searchable>() -> Result<(), CoreError> {
    let invalid = |reason: String| CoreError::InvalidSchema {
        type_name: T::TYPE_NAME.to_string(),
        reason,
    };

    let name = T::TYPE_NAME;
    if name.is_empty() {
        return Err(invalid("type name is empty".to_string()));
    }
    if !paths::is_valid_segment(name) {
        return Err(invalid(format!("type name {name:?} is not a valid path segment")));
    }

    let mut seen = HashSet::new();
    for field in T::fields() {
        if field.name.is_empty() {
            return Err(invalid("field with empty name".to_string()));
        }
        if !seen.insert(field.name) {
            return Err(invalid(format!("duplicate field {:?}", field.name)));
        }
        if field.analyzed && !field.kind.is_supported() {
            return Err(invalid(format!(
                "analyzed field {:?} has unsupported kind {}",
                field.name, field.kind
            )));
        }
    }

    Ok(())
}
