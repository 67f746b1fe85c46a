//! Bulk operations and their endpoints
//!
//! Every supported operation maps statically to one HTTP method, one path and one
//! server-declared batch ceiling.

use crate::adapters::zendesk::HttpMethod;
use crate::domain::{BulkError, Result};
use std::fmt;

/// Singular and plural name of the thing being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noun {
    pub singular: &'static str,
    pub plural: &'static str,
}

impl Noun {
    pub const fn new(singular: &'static str, plural: &'static str) -> Self {
        Self { singular, plural }
    }

    /// "1 ticket", "3 tickets"
    pub fn count(&self, n: usize) -> String {
        if n == 1 {
            format!("1 {}", self.singular)
        } else {
            format!("{n} {}", self.plural)
        }
    }
}

/// Resource family an operation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tickets,
    Users,
    Articles,
    Posts,
}

impl Resource {
    pub const fn noun(&self) -> Noun {
        match self {
            Resource::Tickets => Noun::new("ticket", "tickets"),
            Resource::Users => Noun::new("user", "users"),
            Resource::Articles => Noun::new("article", "articles"),
            Resource::Posts => Noun::new("post", "posts"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun().plural)
    }
}

/// Where the batch's identifiers go in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `?ids=1,2,3`
    IdsQuery,
    /// `{id}` placeholder in the path; one item per request
    PathId,
    /// JSON body; one item per request
    Body,
}

/// Static description of one API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
    pub addressing: Addressing,
    pub max_batch_size: usize,
}

impl Endpoint {
    pub const fn new(
        method: HttpMethod,
        path: &'static str,
        addressing: Addressing,
        max_batch_size: usize,
    ) -> Self {
        Self {
            method,
            path,
            addressing,
            max_batch_size,
        }
    }
}

/// Redirect rule creation endpoint
pub const REDIRECT_RULES: Endpoint =
    Endpoint::new(HttpMethod::Post, "guide/redirect_rules", Addressing::Body, 1);

/// The enumerated bulk operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkOperation {
    SoftDeleteTickets,
    PermanentlyDeleteTickets,
    RestoreTickets,
    ShowTickets,
    SoftDeleteUsers,
    ArchiveArticles,
    PatchPosts,
}

impl BulkOperation {
    pub const ALL: [BulkOperation; 7] = [
        BulkOperation::SoftDeleteTickets,
        BulkOperation::PermanentlyDeleteTickets,
        BulkOperation::RestoreTickets,
        BulkOperation::ShowTickets,
        BulkOperation::SoftDeleteUsers,
        BulkOperation::ArchiveArticles,
        BulkOperation::PatchPosts,
    ];

    pub const fn resource(&self) -> Resource {
        match self {
            BulkOperation::SoftDeleteTickets
            | BulkOperation::PermanentlyDeleteTickets
            | BulkOperation::RestoreTickets
            | BulkOperation::ShowTickets => Resource::Tickets,
            BulkOperation::SoftDeleteUsers => Resource::Users,
            BulkOperation::ArchiveArticles => Resource::Articles,
            BulkOperation::PatchPosts => Resource::Posts,
        }
    }

    /// Command-line selector
    pub const fn selector(&self) -> &'static str {
        match self {
            BulkOperation::SoftDeleteTickets | BulkOperation::SoftDeleteUsers => "soft-delete",
            BulkOperation::PermanentlyDeleteTickets => "permanently-delete",
            BulkOperation::RestoreTickets => "restore",
            BulkOperation::ShowTickets => "show",
            BulkOperation::ArchiveArticles => "archive",
            BulkOperation::PatchPosts => "patch",
        }
    }

    pub const fn endpoint(&self) -> Endpoint {
        use Addressing::*;
        use HttpMethod::*;

        match self {
            BulkOperation::SoftDeleteTickets => {
                Endpoint::new(Delete, "tickets/destroy_many.json", IdsQuery, 100)
            }
            BulkOperation::PermanentlyDeleteTickets => {
                Endpoint::new(Delete, "deleted_tickets/destroy_many.json", IdsQuery, 100)
            }
            BulkOperation::RestoreTickets => {
                Endpoint::new(Put, "deleted_tickets/restore_many.json", IdsQuery, 100)
            }
            BulkOperation::ShowTickets => {
                Endpoint::new(Get, "tickets/show_many.json", IdsQuery, 100)
            }
            BulkOperation::SoftDeleteUsers => {
                Endpoint::new(Delete, "users/destroy_many.json", IdsQuery, 100)
            }
            BulkOperation::ArchiveArticles => {
                Endpoint::new(Delete, "help_center/articles/{id}", PathId, 1)
            }
            BulkOperation::PatchPosts => {
                Endpoint::new(Patch, "community/posts/{id}.json", PathId, 1)
            }
        }
    }

    /// Progressive verb used in progress lines
    pub const fn verb(&self) -> &'static str {
        match self {
            BulkOperation::SoftDeleteTickets | BulkOperation::SoftDeleteUsers => "Deleting",
            BulkOperation::PermanentlyDeleteTickets => "Permanently deleting",
            BulkOperation::RestoreTickets => "Restoring",
            BulkOperation::ShowTickets => "Fetching",
            BulkOperation::ArchiveArticles => "Archiving",
            BulkOperation::PatchPosts => "Moving",
        }
    }

    /// Past-tense verb used in success lines
    pub const fn completed(&self) -> &'static str {
        match self {
            BulkOperation::SoftDeleteTickets | BulkOperation::SoftDeleteUsers => "Deleted",
            BulkOperation::PermanentlyDeleteTickets => "Permanently deleted",
            BulkOperation::RestoreTickets => "Restored",
            BulkOperation::ShowTickets => "Fetched",
            BulkOperation::ArchiveArticles => "Archived",
            BulkOperation::PatchPosts => "Moved",
        }
    }

    /// Operations available for a resource
    pub fn for_resource(resource: Resource) -> impl Iterator<Item = BulkOperation> {
        Self::ALL
            .into_iter()
            .filter(move |op| op.resource() == resource)
    }

    /// Resolves a selector for a resource
    ///
    /// Unknown selectors are a configuration error naming the valid choices.
    pub fn parse(resource: Resource, selector: &str) -> Result<Self> {
        let selector = selector.trim();
        Self::for_resource(resource)
            .find(|op| op.selector() == selector)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::for_resource(resource)
                    .map(|op| op.selector())
                    .collect();
                BulkError::Configuration(format!(
                    "'{selector}' is not a valid {resource} operation: operation must be one of {{{}}}",
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resource(), self.selector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Resource::Tickets, "soft-delete", BulkOperation::SoftDeleteTickets)]
    #[test_case(Resource::Tickets, "permanently-delete", BulkOperation::PermanentlyDeleteTickets)]
    #[test_case(Resource::Tickets, "restore", BulkOperation::RestoreTickets)]
    #[test_case(Resource::Tickets, "show", BulkOperation::ShowTickets)]
    #[test_case(Resource::Users, "soft-delete", BulkOperation::SoftDeleteUsers)]
    #[test_case(Resource::Articles, "archive", BulkOperation::ArchiveArticles)]
    #[test_case(Resource::Posts, "patch", BulkOperation::PatchPosts)]
    fn test_parse_valid(resource: Resource, selector: &str, expected: BulkOperation) {
        assert_eq!(BulkOperation::parse(resource, selector).unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid_lists_choices() {
        let err = BulkOperation::parse(Resource::Tickets, "purge").unwrap_err();
        assert!(err.is_configuration());
        let msg = err.to_string();
        assert!(msg.contains("operation must be one of"));
        assert!(msg.contains("soft-delete, permanently-delete, restore, show"));
    }

    #[test]
    fn test_selector_is_scoped_to_resource() {
        assert!(BulkOperation::parse(Resource::Users, "restore").is_err());
        assert!(BulkOperation::parse(Resource::Articles, "soft-delete").is_err());
    }

    #[test]
    fn test_endpoint_table() {
        let restore = BulkOperation::RestoreTickets.endpoint();
        assert_eq!(restore.method, HttpMethod::Put);
        assert_eq!(restore.path, "deleted_tickets/restore_many.json");
        assert_eq!(restore.max_batch_size, 100);

        let archive = BulkOperation::ArchiveArticles.endpoint();
        assert_eq!(archive.method, HttpMethod::Delete);
        assert_eq!(archive.addressing, Addressing::PathId);
        assert_eq!(archive.max_batch_size, 1);

        for op in BulkOperation::ALL {
            assert!(op.endpoint().max_batch_size >= 1, "{op}");
        }
    }

    #[test]
    fn test_noun_count() {
        let noun = Resource::Articles.noun();
        assert_eq!(noun.count(1), "1 article");
        assert_eq!(noun.count(0), "0 articles");
        assert_eq!(noun.count(2), "2 articles");
    }
}
