// zendesk-bulk - Bulk operations for the Zendesk REST API
// Copyright (c) 2025 zendesk-bulk Contributors
// Licensed under the MIT License

//! # zendesk-bulk
//!
//! Bulk operations and exports against the Zendesk Support and Guide REST APIs.
//!
//! ## Overview
//!
//! The library is built around two patterns:
//! - **Batch execution**: split an identifier list into batches the endpoint accepts
//!   and release one request per batch on a fixed stagger
//! - **Paginated collection**: follow next-page pointers to exhaustion, filter and
//!   deduplicate the results, then write them out once
//!
//! Both share a rate-limit policy that waits out `429` responses for the
//! `Retry-After` delay and re-issues the identical request.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Batch execution, collection, retry and output sinks
//! - [`adapters`] - Zendesk HTTP client and transport
//! - [`domain`] - Identifiers, records, redirect rules and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zendesk_bulk::adapters::zendesk::ZendeskClient;
//! use zendesk_bulk::config::load_config;
//! use zendesk_bulk::core::batch::{BatchExecutor, BulkOperation, OperationPlan, Resource};
//! use zendesk_bulk::domain::IdList;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("zendesk-bulk.toml")?;
//!     let client = ZendeskClient::from_config(&config)?;
//!
//!     let operation = BulkOperation::parse(Resource::Tickets, "soft-delete")?;
//!     let plan = OperationPlan::new(operation, None)?;
//!     let ids = IdList::parse("101,102,103")?;
//!
//!     let report = BatchExecutor::new(&client, config.batch.stagger())
//!         .run(ids.as_slice(), None, &plan)
//!         .await?;
//!
//!     for outcome in &report.outcomes {
//!         println!("{}", outcome.message());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`]. Errors raised before any request is
//! sent are [`domain::BulkError::Configuration`]; API failures are reported per batch
//! or per collection run rather than returned.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
