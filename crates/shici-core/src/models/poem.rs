use serde::{Deserialize, Serialize};

use crate::document::{FieldKind, FieldSpec, Searchable};

/// A poem as stored in the search index.
///
/// Simplified (`name`, `content`, ...) and traditional (`*_cht`) renderings
/// are indexed side by side so either script matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemDocument {
    pub id: String,
    pub dynasty_id: String,
    pub poet_id: String,
    pub poet_name: String,
    pub poet_name_cht: String,
    /// Verse form code (five-character quatrain, regulated verse, ...).
    pub form: i32,
    pub name: String,
    pub name_cht: String,
    pub content: String,
    pub content_cht: String,
    #[serde(default)]
    pub appreciation: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub updated_at: jiff::Timestamp,
}

static POEM_FIELDS: [FieldSpec; 13] = [
    FieldSpec::exact("id", FieldKind::Text),
    FieldSpec::exact("dynasty_id", FieldKind::Text),
    FieldSpec::exact("poet_id", FieldKind::Text),
    FieldSpec::analyzed("poet_name", FieldKind::Text),
    FieldSpec::analyzed("poet_name_cht", FieldKind::Text),
    FieldSpec::exact("form", FieldKind::Integer),
    FieldSpec::analyzed("name", FieldKind::Text),
    FieldSpec::analyzed("name_cht", FieldKind::Text),
    FieldSpec::analyzed("content", FieldKind::Text),
    FieldSpec::analyzed("content_cht", FieldKind::Text),
    FieldSpec::exact("appreciation", FieldKind::Text),
    // Neither has an engine mapping; both stay in `_source` only.
    FieldSpec::exact("tags", FieldKind::List),
    FieldSpec::exact("updated_at", FieldKind::Timestamp),
];

impl Searchable for PoemDocument {
    const TYPE_NAME: &'static str = "Poem";

    fn fields() -> &'static [FieldSpec] {
        &POEM_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }
}
