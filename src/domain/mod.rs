//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`ResourceId`], [`IdList`])
//! - **Records** ([`Record`]) and their deduplication keys ([`DedupKey`], [`DedupStrategy`])
//! - **Redirect rules** ([`RedirectRule`], [`RuleSet`])
//! - **Error types** ([`BulkError`], [`ApiError`])
//! - **Result type aliases** ([`Result`], [`ApiResult`])
//!
//! # Example
//!
//! ```rust
//! use zendesk_bulk::domain::IdList;
//!
//! # fn example() -> zendesk_bulk::domain::Result<()> {
//! let ids = IdList::parse("1,2,3")?;
//! assert_eq!(ids.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod redirect;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ApiError, BulkError};
pub use ids::{IdList, ResourceId};
pub use record::{DedupKey, DedupStrategy, Record};
pub use redirect::{RedirectRule, RuleSet};
pub use result::{ApiResult, Result};
