//! Exported records and their deduplication keys

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An opaque record returned by a listing or export endpoint
///
/// Records are kept as raw JSON so exports preserve every field the API returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The record's `id`, rendered as a string whether the API sent a number or a string
    pub fn id(&self) -> Option<String> {
        self.field("id").and_then(scalar_to_string)
    }

    /// The record's `updated_at` marker
    pub fn updated_at(&self) -> Option<&str> {
        self.field("updated_at").and_then(Value::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Compares a scalar field against a string, ignoring whether the API sent a number
    pub fn field_equals(&self, name: &str, expected: &str) -> bool {
        self.field(name)
            .and_then(scalar_to_string)
            .is_some_and(|value| value == expected)
    }

    /// Returns true when the record's `tags` array contains `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.field("tags")
            .and_then(Value::as_array)
            .is_some_and(|tags| tags.iter().any(|t| t.as_str() == Some(tag)))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Composite key used to collapse duplicate page results
///
/// Two records share a key only if they have the same identifier and, for mutable
/// sources, the same last-modified marker. A record updated mid-export therefore
/// produces a second, distinct key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    id: String,
    marker: Option<String>,
}

impl DedupKey {
    pub fn new(id: impl Into<String>, marker: Option<String>) -> Self {
        Self {
            id: id.into(),
            marker,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.marker {
            Some(marker) => write!(f, "{}@{}", self.id, marker),
            None => write!(f, "{}", self.id),
        }
    }
}

/// How a source derives dedup keys from its records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Identifier only; for sources whose records do not change during the walk
    Id,
    /// Identifier plus `updated_at`; for incremental exports of mutable records
    IdAndUpdatedAt,
}

impl DedupStrategy {
    /// Derives the key for a record
    ///
    /// Records without an `id` fall back to their full JSON text, so only exact
    /// duplicates collapse.
    pub fn key_for(&self, record: &Record) -> DedupKey {
        let id = record
            .id()
            .unwrap_or_else(|| record.as_value().to_string());
        let marker = match self {
            DedupStrategy::Id => None,
            DedupStrategy::IdAndUpdatedAt => record.updated_at().map(str::to_string),
        };
        DedupKey::new(id, marker)
    }
}
