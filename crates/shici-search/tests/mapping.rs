mod common;

use serde::{Deserialize, Serialize};
use serde_json::json;

use shici_core::document::{FieldKind, FieldSpec, Searchable};
use shici_core::models::{PoemDocument, PoetDocument};
use shici_search::SearchError;
use shici_search::mapping::{IndexMode, build_mapping, mapping_body};

use common::Article;

#[derive(Debug, Serialize, Deserialize)]
struct Note {
    id: String,
}

impl Searchable for Note {
    const TYPE_NAME: &'static str = "Note";

    fn fields() -> &'static [FieldSpec] {
        static FIELDS: [FieldSpec; 2] = [
            FieldSpec::analyzed("body", FieldKind::Text),
            FieldSpec::exact("attachments", FieldKind::Object),
        ];
        &FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TaggedNote {
    id: String,
}

impl Searchable for TaggedNote {
    const TYPE_NAME: &'static str = "TaggedNote";

    fn fields() -> &'static [FieldSpec] {
        static FIELDS: [FieldSpec; 2] = [
            FieldSpec::analyzed("body", FieldKind::Text),
            FieldSpec::analyzed("tags", FieldKind::List),
        ];
        &FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[test]
fn unsupported_exact_field_is_dropped() {
    let mapping = build_mapping::<Note>().unwrap();
    assert_eq!(mapping.len(), 1);
    let body = &mapping["body"];
    assert_eq!(body.field_type, "text");
    assert_eq!(body.index, IndexMode::Analyzed);
}

#[test]
fn unsupported_analyzed_field_is_an_error() {
    let err = build_mapping::<TaggedNote>().unwrap_err();
    match err {
        SearchError::UnsupportedFieldType {
            type_name,
            field,
            kind,
        } => {
            assert_eq!(type_name, "TaggedNote");
            assert_eq!(field, "tags");
            assert_eq!(kind, FieldKind::List);
        }
        other => panic!("expected UnsupportedFieldType, got {other:?}"),
    }
}

#[test]
fn exact_fields_are_not_analyzed() {
    let mapping = build_mapping::<Article>().unwrap();
    assert_eq!(mapping["id"].index, IndexMode::NotAnalyzed);
    assert_eq!(mapping["views"].field_type, "integer");
    assert_eq!(mapping["views"].index, IndexMode::NotAnalyzed);
    assert!(!mapping.contains_key("published"));
}

#[test]
fn poem_mapping_skips_list_and_timestamp_fields() {
    let mapping = build_mapping::<PoemDocument>().unwrap();
    assert_eq!(mapping.len(), 11);
    assert!(!mapping.contains_key("tags"));
    assert!(!mapping.contains_key("updated_at"));
    assert_eq!(mapping["content_cht"].index, IndexMode::Analyzed);
    assert_eq!(mapping["form"].field_type, "integer");
}

#[test]
fn poet_mapping_uses_long_for_counts() {
    let mapping = build_mapping::<PoetDocument>().unwrap();
    assert_eq!(mapping["poem_count"].field_type, "long");
    assert_eq!(mapping["birth"].index, IndexMode::NotAnalyzed);
}

#[test]
fn mapping_body_wraps_properties() {
    let body = mapping_body::<Note>().unwrap();
    assert_eq!(
        body,
        json!({ "properties": { "body": { "type": "text", "index": "analyzed" } } })
    );
}

#[test]
fn not_analyzed_serializes_with_underscore() {
    let body = mapping_body::<Article>().unwrap();
    assert_eq!(body["properties"]["id"]["index"], "not_analyzed");
}
