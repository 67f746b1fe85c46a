//! Identifier types with validation
//!
//! Zendesk identifiers are treated as opaque strings. The caller supplies them as a
//! comma-separated list; the list is kept in order and is not deduplicated.

use super::errors::BulkError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use zendesk_bulk::domain::ids::ResourceId;
/// use std::str::FromStr;
///
/// let id = ResourceId::from_str("35436").unwrap();
/// assert_eq!(id.as_str(), "35436");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new ResourceId from a string
    ///
    /// Surrounding whitespace is trimmed. Identifiers are placed verbatim in URL
    /// paths and `ids=` query values, so only ASCII letters, digits, `_` and `-`
    /// are accepted.
    pub fn new(id: impl Into<String>) -> std::result::Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Identifier cannot be empty".to_string());
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(format!(
                "Identifier '{trimmed}' contains invalid character '{c}' (allowed: letters, digits, '_', '-')"
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, non-empty list of identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList(Vec<ResourceId>);

impl IdList {
    /// Parses a comma-separated identifier list such as `"1,2,3"`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the list is empty or contains an
    /// empty element.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(BulkError::Configuration(
                "at least one identifier required".to_string(),
            ));
        }

        let ids = input
            .split(',')
            .enumerate()
            .map(|(position, raw)| {
                ResourceId::new(raw).map_err(|e| {
                    BulkError::Configuration(format!("Invalid identifier at position {}: {e}", position + 1))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_ids(ids)
    }

    /// Builds a list from already-validated identifiers
    pub fn from_ids(ids: Vec<ResourceId>) -> Result<Self> {
        if ids.is_empty() {
            return Err(BulkError::Configuration(
                "at least one identifier required".to_string(),
            ));
        }
        Ok(Self(ids))
    }

    pub fn as_slice(&self) -> &[ResourceId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for IdList {
    type Err = BulkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_resource_id_trims() {
        let id = ResourceId::new("  42 ").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_resource_id_rejects_empty() {
        assert!(ResourceId::new("").is_err());
        assert!(ResourceId::new("   ").is_err());
    }

    #[test_case("../x"; "path traversal")]
    #[test_case("1&ids=2"; "query injection")]
    #[test_case("5/restore"; "path segment")]
    #[test_case("1?force=true"; "query start")]
    #[test_case("12 34"; "inner space")]
    #[test_case("1%2F2"; "percent escape")]
    fn test_resource_id_rejects_url_syntax(input: &str) {
        let err = ResourceId::new(input).unwrap_err();
        assert!(err.contains("invalid character"));
    }

    #[test]
    fn test_resource_id_accepts_opaque_tokens() {
        assert!(ResourceId::new("360001234567").is_ok());
        assert!(ResourceId::new("abc_DEF-9").is_ok());
    }

    #[test]
    fn test_resource_id_deserialize_validates() {
        let id: ResourceId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_str(), "42");
        assert!(serde_json::from_str::<ResourceId>("\"../x\"").is_err());
    }

    #[test]
    fn test_id_list_rejects_injected_ids() {
        let err = IdList::parse("1,1&ids=999").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("position 2"));
        assert!(IdList::parse("../../users/5").is_err());
    }

    #[test]
    fn test_id_list_preserves_order_and_duplicates() {
        let list = IdList::parse("3, 1,2,1").unwrap();
        let ids: Vec<&str> = list.as_slice().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2", "1"]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_id_list_empty_input() {
        let err = IdList::parse("").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("at least one identifier required"));
    }

    #[test]
    fn test_id_list_empty_element() {
        let err = IdList::parse("1,,2").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_id_list_from_str() {
        let list: IdList = "7".parse().unwrap();
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_from_ids_rejects_empty() {
        assert!(IdList::from_ids(vec![]).is_err());
    }
}
