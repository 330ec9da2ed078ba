//! Normalized document records

use super::paths::FieldPath;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Where each logical field lives in a raw record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPaths {
    /// Document identifier
    pub id: FieldPath,
    /// Document title
    pub title: FieldPath,
    /// Item type
    #[serde(rename = "type")]
    pub kind: FieldPath,
    /// Document type name
    pub doc_type: FieldPath,
    /// Document type id
    pub doc_type_id: FieldPath,
    /// Last modification timestamp
    pub last_modified: FieldPath,
}

impl FieldPaths {
    /// Paths for items returned by `/search`
    pub fn search_defaults() -> Self {
        Self {
            id: FieldPath::key("source_item_id"),
            title: FieldPath::key("title"),
            kind: FieldPath::key("type"),
            doc_type: FieldPath::parse("sub_type_field.name"),
            doc_type_id: FieldPath::parse("sub_type_field.value_id"),
            last_modified: FieldPath::key("last_modified_date_time"),
        }
    }

    /// Paths for items returned by `/portals/content_items`
    pub fn content_item_defaults() -> Self {
        Self::search_defaults()
    }

    /// Resolve every field of `record` independently
    pub fn normalize(&self, record: &JsonValue) -> NormalizedRecord {
        let field = |path: &FieldPath| path.resolve(record).cloned();
        NormalizedRecord {
            source_item_id: field(&self.id),
            title: field(&self.title),
            kind: field(&self.kind),
            doc_type: field(&self.doc_type),
            doc_type_id: field(&self.doc_type_id),
            last_modified_date_time: field(&self.last_modified),
            raw: None,
        }
    }

    /// Normalize and optionally keep the raw record alongside
    pub fn normalize_owned(&self, record: JsonValue, keep_raw: bool) -> NormalizedRecord {
        let mut normalized = self.normalize(&record);
        if keep_raw {
            normalized.raw = Some(record);
        }
        normalized
    }
}

impl Default for FieldPaths {
    fn default() -> Self {
        Self::search_defaults()
    }
}

/// Flat, caller-friendly document record. Unresolved fields are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub source_item_id: Option<JsonValue>,
    pub title: Option<JsonValue>,
    #[serde(rename = "type")]
    pub kind: Option<JsonValue>,
    pub doc_type: Option<JsonValue>,
    pub doc_type_id: Option<JsonValue>,
    pub last_modified_date_time: Option<JsonValue>,
    /// Raw backend item, kept only while debug logging is on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<JsonValue>,
}
