use serde::{Deserialize, Serialize};

use crate::document::{FieldKind, FieldSpec, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoetDocument {
    pub id: String,
    pub dynasty_id: String,
    pub name: String,
    pub name_cht: String,
    pub description: String,
    pub description_cht: String,
    /// Free-form year text ("701", "c. 712"); not a date.
    pub birth: String,
    pub death: String,
    pub poem_count: i64,
}

static POET_FIELDS: [FieldSpec; 9] = [
    FieldSpec::exact("id", FieldKind::Text),
    FieldSpec::exact("dynasty_id", FieldKind::Text),
    FieldSpec::analyzed("name", FieldKind::Text),
    FieldSpec::analyzed("name_cht", FieldKind::Text),
    FieldSpec::analyzed("description", FieldKind::Text),
    FieldSpec::analyzed("description_cht", FieldKind::Text),
    FieldSpec::exact("birth", FieldKind::Text),
    FieldSpec::exact("death", FieldKind::Text),
    FieldSpec::exact("poem_count", FieldKind::Long),
];

impl Searchable for PoetDocument {
    const TYPE_NAME: &'static str = "Poet";

    fn fields() -> &'static [FieldSpec] {
        &POET_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }
}
