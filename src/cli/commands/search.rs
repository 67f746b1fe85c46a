//! Search command implementation
//!
//! Pages through `search.json` and prints the count and the ids of every result.
//! The search API stops serving pages past its result cap; whatever was collected
//! up to that point is still printed.

use super::{connect, print_abort};
use crate::core::collect::{PaginatedCollector, TicketSearchSource};
use crate::core::sink::IdListSink;
use crate::domain::BulkError;
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query, e.g. "type:ticket status:open"
    pub query: String,
}

impl SearchArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(BulkError::Configuration("search query cannot be empty".to_string()).into());
        }

        let (_config, client) = connect(config_path)?;
        let url = client.api_url(&format!("search.json?query={}", encode_query(query)));

        tracing::info!(query = %query, "Starting search");

        let mut sink = IdListSink::stdout("tickets");
        let outcome = PaginatedCollector::new(&client, TicketSearchSource)
            .run(url, &mut sink)
            .await?;

        if let Some(summary) = outcome.summary() {
            if summary.truncated {
                eprintln!("We reached the limit of total search results; the list above is partial.");
            }
        } else {
            print_abort(&outcome);
        }
        Ok(0)
    }
}

/// Form-encodes a search query for the `query` parameter
pub fn encode_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}
