//! Tests for the normalize module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn search_item() -> serde_json::Value {
    json!({
        "source_item_id": 4711,
        "title": "Pensioenregeling 2024",
        "type": "document",
        "sub_type_field": {"name": "Beleid", "value_id": 12},
        "last_modified_date_time": "2024-03-01T10:00:00Z"
    })
}

// ============================================================================
// FieldPath Tests
// ============================================================================

#[test_case("a", &["a"] ; "single key")]
#[test_case("a.b.c", &["a", "b", "c"] ; "nested")]
#[test_case("a..b", &["a", "b"] ; "empty segment skipped")]
#[test_case("", &[] ; "empty")]
fn test_field_path_parse(input: &str, expected: &[&str]) {
    let path = FieldPath::parse(input);
    assert_eq!(path.segments(), expected);
}

#[test]
fn test_field_path_display_and_from() {
    let path: FieldPath = "sub_type_field.value_id".into();
    assert_eq!(path.to_string(), "sub_type_field.value_id");
    assert_eq!(path, FieldPath::new(["sub_type_field", "value_id"]));
}

#[test]
fn test_lookup_present_leaf_unchanged() {
    let item = search_item();
    assert_eq!(lookup(&item, &["sub_type_field", "name"]), Some(&json!("Beleid")));
    assert_eq!(
        lookup(&item, &["sub_type_field"]),
        Some(&json!({"name": "Beleid", "value_id": 12}))
    );
}

#[test]
fn test_lookup_missing_intermediate() {
    let item = search_item();
    assert_eq!(lookup(&item, &["metadata", "name"]), None);
}

#[test]
fn test_lookup_through_scalar() {
    let item = search_item();
    assert_eq!(lookup(&item, &["title", "length"]), None);
}

#[test]
fn test_lookup_empty_path() {
    let empty: [&str; 0] = [];
    assert_eq!(lookup(&search_item(), &empty), None);
    assert_eq!(FieldPath::none().resolve(&search_item()), None);
}

#[test]
fn test_lookup_explicit_null_leaf() {
    let item = json!({"a": {"b": null}});
    assert_eq!(lookup(&item, &["a", "b"]), Some(&serde_json::Value::Null));
}

// ============================================================================
// FieldPaths / NormalizedRecord Tests
// ============================================================================

#[test]
fn test_normalize_full_record() {
    let normalized = FieldPaths::search_defaults().normalize(&search_item());

    assert_eq!(normalized.source_item_id, Some(json!(4711)));
    assert_eq!(normalized.title, Some(json!("Pensioenregeling 2024")));
    assert_eq!(normalized.kind, Some(json!("document")));
    assert_eq!(normalized.doc_type, Some(json!("Beleid")));
    assert_eq!(normalized.doc_type_id, Some(json!(12)));
    assert_eq!(
        normalized.last_modified_date_time,
        Some(json!("2024-03-01T10:00:00Z"))
    );
    assert!(normalized.raw.is_none());
}

#[test]
fn test_normalize_missing_fields_are_null() {
    let item = json!({"source_item_id": 1, "title": "Kaal"});
    let normalized = FieldPaths::content_item_defaults().normalize(&item);

    assert_eq!(
        serde_json::to_value(&normalized).unwrap(),
        json!({
            "source_item_id": 1,
            "title": "Kaal",
            "type": null,
            "doc_type": null,
            "doc_type_id": null,
            "last_modified_date_time": null
        })
    );
}

#[test]
fn test_normalize_custom_paths() {
    let paths = FieldPaths {
        id: FieldPath::key("id"),
        title: FieldPath::parse("meta.title"),
        kind: FieldPath::none(),
        doc_type: FieldPath::parse("meta.kind.label"),
        doc_type_id: FieldPath::parse("meta.kind.id"),
        last_modified: FieldPath::parse("audit.modified"),
    };
    let item = json!({
        "id": "abc",
        "meta": {"title": "Handboek", "kind": {"label": "Procedure", "id": 3}},
        "audit": {"modified": "2023-12-31"}
    });

    let normalized = paths.normalize(&item);
    assert_eq!(normalized.source_item_id, Some(json!("abc")));
    assert_eq!(normalized.title, Some(json!("Handboek")));
    assert_eq!(normalized.kind, None);
    assert_eq!(normalized.doc_type, Some(json!("Procedure")));
    assert_eq!(normalized.doc_type_id, Some(json!(3)));
    assert_eq!(normalized.last_modified_date_time, Some(json!("2023-12-31")));
}

#[test]
fn test_normalize_owned_keeps_raw() {
    let item = search_item();
    let normalized = FieldPaths::search_defaults().normalize_owned(item.clone(), true);
    assert_eq!(normalized.raw, Some(item));

    let rendered = serde_json::to_value(&normalized).unwrap();
    assert!(rendered.get("raw").is_some());
}

#[test]
fn test_normalize_non_object_record() {
    let normalized = FieldPaths::search_defaults().normalize(&json!("just a string"));
    assert_eq!(normalized.source_item_id, None);
    assert_eq!(normalized.title, None);
}

#[test]
fn test_field_paths_deserialize() {
    let paths: FieldPaths = serde_json::from_value(json!({
        "id": ["source_item_id"],
        "title": ["title"],
        "type": [],
        "doc_type": ["sub_type_field", "name"],
        "doc_type_id": ["sub_type_field", "value_id"],
        "last_modified": ["last_modified_date_time"]
    }))
    .unwrap();
    assert_eq!(paths.kind, FieldPath::none());
    assert_eq!(paths.doc_type, FieldPath::parse("sub_type_field.name"));
}
