//! Tool catalog and argument types

use serde::{Deserialize, Deserializer, Serialize};

/// Knowledge listings
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Knowledge search and concept listings
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Document search
pub const DEFAULT_DOCUMENT_SEARCH_LIMIT: usize = 10;

/// Raw content item page size
pub const DEFAULT_CONTENT_LIMIT: u32 = 50;

/// What a tool returns on success, and therefore the shape of its sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnShape {
    /// A list of records; failures become `[{"error": ...}]`
    List,
    /// A single record; failures become `{"error": ...}`
    Record,
}

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    String,
    Integer,
}

/// One tool parameter
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

/// Tool description for agent registration
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub returns: ReturnShape,
}

impl ToolSpec {
    /// Sentinel value in this tool's return shape
    pub fn sentinel(&self, message: impl Into<String>) -> serde_json::Value {
        let record = serde_json::json!({ "error": message.into() });
        match self.returns {
            ReturnShape::List => serde_json::Value::Array(vec![record]),
            ReturnShape::Record => record,
        }
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// `limit` only
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitArgs {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Knowledge item identifier
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeItemArgs {
    #[serde(deserialize_with = "string_or_number")]
    pub identifier: String,
}

/// Free-text knowledge search
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchKnowledgeArgs {
    pub search_term: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Incidents of one caller
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallerIncidentsArgs {
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Incident number
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncidentArgs {
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
}

/// Document collection cap
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListDocumentsArgs {
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// Document search
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchDocumentsArgs {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub portal_id: Option<u64>,
}

/// Document id
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentArgs {
    #[serde(deserialize_with = "string_or_number")]
    pub document_id: String,
}

/// One raw content item page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentArgs {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Result of `download_document`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadedDocument {
    pub document_id: String,
    pub size_bytes: usize,
    pub content_base64: String,
}

/// Agents send ids both as strings and as numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
