//! Field paths and nested lookup

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Ordered list of object keys to descend through
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Path from a key sequence
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Single top-level key
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![key.into()])
    }

    /// Path that never resolves
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Parse a dotted path such as `sub_type_field.value_id`
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.').filter(|segment| !segment.is_empty()))
    }

    /// Key segments
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True for a zero-length path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve against a record
    pub fn resolve<'v>(&self, record: &'v JsonValue) -> Option<&'v JsonValue> {
        lookup(record, &self.0)
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Walk `path` through nested objects.
///
/// Returns `None` for an empty path, a missing key, or a non-object
/// intermediate value. Never panics.
pub fn lookup<'v, S: AsRef<str>>(value: &'v JsonValue, path: &[S]) -> Option<&'v JsonValue> {
    if path.is_empty() {
        return None;
    }

    let mut current = value;
    for key in path {
        match current {
            JsonValue::Object(map) => current = map.get(key.as_ref())?,
            _ => return None,
        }
    }
    Some(current)
}
