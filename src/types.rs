//! Common types used throughout deskbridge
//!
//! Shared type aliases and small value types used across modules.

use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A raw backend record. Keys vary per record and per backend.
pub type Record = JsonValue;

/// Query parameters for a request.
///
/// Ordered so request logs and wire order are stable.
pub type QueryParams = BTreeMap<String, String>;

// ============================================================================
// Query parameter helpers
// ============================================================================

/// Insert helpers for building query parameter maps
pub trait QueryParamsExt {
    /// Insert a value that renders to a string (numbers, strings)
    fn set(&mut self, key: &str, value: impl ToString) -> &mut Self;

    /// Insert only when the value is present
    fn set_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self;
}

impl QueryParamsExt for QueryParams {
    fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.insert(key.to_string(), value.to_string());
        self
    }

    fn set_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key.to_string(), value.to_string());
        }
        self
    }
}

/// Which backend a client or tool talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// TOPdesk service management (knowledge items, incidents)
    Topdesk,
    /// Zenya document management (content items, search, downloads)
    Zenya,
}

impl Backend {
    /// Display name used in logs and sentinel messages
    pub fn name(self) -> &'static str {
        match self {
            Backend::Topdesk => "TOPdesk",
            Backend::Zenya => "Zenya",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
