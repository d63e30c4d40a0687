use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};
use shici_core::document::Searchable;
use tracing::info;

use crate::error::SearchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    Analyzed,
    NotAnalyzed,
}

/// Index settings for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub index: IndexMode,
}

/// Field mappings for `T`, keyed by field name.
///
/// Non-analyzed fields without an engine type are left out so a stray
/// utility field never blocks mapping creation. An analyzed field without
/// one is an error.
pub fn build_mapping<T: Searchable>() -> Result<BTreeMap<String, FieldMapping>, SearchError> {
    info!("building mapping for document type {}", T::TYPE_NAME);

    let mut properties = BTreeMap::new();
    for field in T::fields() {
        let index = if field.analyzed {
            IndexMode::Analyzed
        } else {
            IndexMode::NotAnalyzed
        };

        match field.kind.engine_type() {
            Some(field_type) => {
                properties.insert(field.name.to_string(), FieldMapping { field_type, index });
            }
            None if field.analyzed => {
                return Err(SearchError::UnsupportedFieldType {
                    type_name: T::TYPE_NAME.to_string(),
                    field: field.name.to_string(),
                    kind: field.kind,
                });
            }
            None => {
                info!(field = field.name, kind = %field.kind, "ignoring unsupported field");
            }
        }
    }

    Ok(properties)
}

/// Request body for a mapping PUT: `{ "properties": { ... } }`.
pub fn mapping_body<T: Searchable>() -> Result<Value, SearchError> {
    let properties = build_mapping::<T>()?;
    Ok(json!({ "properties": properties }))
}
