//! Client-side record filters

use crate::domain::Record;

/// A single condition on a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Scalar field equals the value, compared as text
    FieldEquals { field: String, value: String },
    /// `tags` array contains the tag
    HasTag(String),
}

impl Predicate {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::FieldEquals { field, value } => record.field_equals(field, value),
            Predicate::HasTag(tag) => record.has_tag(tag),
        }
    }
}

/// Conjunction of predicates; an empty filter accepts everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    predicates: Vec<Predicate>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::FieldEquals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn has_tag(mut self, tag: impl Into<String>) -> Self {
        self.predicates.push(Predicate::HasTag(tag.into()));
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Keeps matching records in order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        if self.predicates.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_org_and_tag_filter() {
        let filter = RecordFilter::new()
            .field_equals("organization_id", "42")
            .has_tag("vip");

        let records = vec![
            Record::new(json!({"id": 1, "organization_id": 42, "tags": ["vip", "urgent"]})),
            Record::new(json!({"id": 2, "organization_id": 42, "tags": ["normal"]})),
            Record::new(json!({"id": 3, "organization_id": 7, "tags": ["vip"]})),
            Record::new(json!({"id": 4, "organization_id": "42", "tags": ["vip"]})),
            Record::new(json!({"id": 5, "organization_id": null, "tags": ["vip"]})),
        ];

        let kept: Vec<String> = filter
            .apply(records)
            .iter()
            .filter_map(Record::id)
            .collect();
        assert_eq!(kept, vec!["1", "4"]);
    }

    #[test]
    fn test_empty_filter_accepts_all() {
        let records = vec![Record::new(json!({"id": 1})), Record::new(json!({}))];
        assert_eq!(RecordFilter::new().apply(records).len(), 2);
    }
}
