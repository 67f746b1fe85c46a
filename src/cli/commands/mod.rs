//! CLI command implementations
//!
//! Commands return an exit code. Problems with a single batch or a collection run are
//! reported and still exit 0; configuration problems surface as
//! [`BulkError::Configuration`](crate::domain::BulkError) and map to exit code 2.

pub mod bulk;
pub mod export;
pub mod init;
pub mod redirects;
pub mod search;
pub mod validate;

use crate::adapters::zendesk::ZendeskClient;
use crate::config::{load_config, BulkConfig};
use crate::core::batch::{BatchReport, AUTHENTICATION_DIAGNOSTIC};
use crate::core::collect::CollectionOutcome;
use crate::domain::{BulkError, Result};

/// Loads the configuration and builds an authenticated client
pub(crate) fn connect(config_path: &str) -> Result<(BulkConfig, ZendeskClient)> {
    let config = load_config(config_path)?;
    let client = ZendeskClient::from_config(&config)?;
    Ok((config, client))
}

/// Prints one line (or block) per batch in batch order
pub(crate) fn print_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        if outcome.status.is_success() {
            println!("{}", outcome.message());
        } else {
            eprintln!("{}", outcome.message());
        }
    }
}

/// Prints the diagnostic for an aborted collection
pub(crate) fn print_abort(outcome: &CollectionOutcome) {
    if let CollectionOutcome::Aborted {
        error,
        pages_fetched,
    } = outcome
    {
        match error {
            BulkError::Api(api) if api.is_authentication() => {
                eprintln!("{AUTHENTICATION_DIAGNOSTIC}");
            }
            other => {
                eprintln!("Collection aborted after {pages_fetched} page(s): {other}");
            }
        }
        eprintln!("No output was written.");
    }
}
