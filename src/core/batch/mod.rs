//! Bulk batch execution
//!
//! - [`operation`] - the enumerated operations and their endpoints
//! - [`plan`] - request building and response reading per operation
//! - [`executor`] - partitioning and staggered dispatch
//! - [`report`] - per-batch outcomes and the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use zendesk_bulk::adapters::zendesk::ZendeskClient;
//! use zendesk_bulk::config::load_config;
//! use zendesk_bulk::core::batch::{BatchExecutor, BulkOperation, OperationPlan, Resource};
//! use zendesk_bulk::domain::IdList;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("zendesk-bulk.toml")?;
//! let client = ZendeskClient::from_config(&config)?;
//!
//! let operation = BulkOperation::parse(Resource::Tickets, "restore")?;
//! let plan = OperationPlan::new(operation, None)?;
//! let ids = IdList::parse("1,2,3")?;
//!
//! let report = BatchExecutor::new(&client, config.batch.stagger())
//!     .run(ids.as_slice(), None, &plan)
//!     .await?;
//! println!("{} of {} batches succeeded", report.succeeded(), report.total_batches());
//! # Ok(())
//! # }
//! ```

pub mod executor;
pub mod operation;
pub mod plan;
pub mod report;

pub use executor::{partition, resolve_batch_size, BatchExecutor};
pub use operation::{Addressing, BulkOperation, Endpoint, Noun, Resource, REDIRECT_RULES};
pub use plan::{BatchPlan, OperationPlan, RedirectPlan, Unresolved};
pub use report::{BatchOutcome, BatchReport, BatchStatus, AUTHENTICATION_DIAGNOSTIC};
