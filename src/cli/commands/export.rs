//! Export commands
//!
//! `export-tickets` walks the incremental ticket export and keeps tickets of one
//! organization that carry a tag. `export-posts` walks every post of a community
//! topic. Both write a single JSON array once the walk is complete.

use super::{connect, print_abort};
use crate::core::collect::{
    CollectionOutcome, CommunityPostSource, IncrementalTicketSource, PaginatedCollector,
    RecordFilter,
};
use crate::core::sink::JsonFileSink;
use crate::domain::{BulkError, ResourceId, Result};
use chrono::DateTime;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export-tickets command
#[derive(Args, Debug)]
pub struct ExportTicketsArgs {
    /// Start time as Unix seconds or RFC 3339 (e.g. 2024-01-01T00:00:00Z)
    pub start_time: String,

    /// Keep only tickets carrying this tag
    pub tag: String,

    /// Keep only tickets of this organization
    pub organization_id: String,

    /// Output file (defaults to `export.tickets_file` in `export.output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportTicketsArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let start_time = parse_start_time(&self.start_time)?;
        let tag = non_empty("tag", &self.tag)?;
        let organization_id = non_empty("organization id", &self.organization_id)?;

        let (config, client) = connect(config_path)?;
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| config.export.tickets_path());

        tracing::info!(
            start_time,
            tag = %tag,
            organization_id = %organization_id,
            output = %path.display(),
            "Starting ticket export"
        );

        let filter = RecordFilter::new()
            .field_equals("organization_id", organization_id)
            .has_tag(tag);
        let url = client.api_url(&format!("incremental/tickets.json?start_time={start_time}"));
        let mut sink = JsonFileSink::new(&path);

        let outcome = PaginatedCollector::new(&client, IncrementalTicketSource)
            .with_filter(filter)
            .run(url, &mut sink)
            .await?;

        report(&outcome, "tickets", &path);
        Ok(0)
    }
}

/// Arguments for the export-posts command
#[derive(Args, Debug)]
pub struct ExportPostsArgs {
    /// Community topic to export
    pub topic_id: String,

    /// Output file (defaults to `export.posts_file` in `export.output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportPostsArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let topic_id = ResourceId::new(&*self.topic_id)
            .map_err(|e| BulkError::Configuration(format!("Invalid topic id: {e}")))?;

        let (config, client) = connect(config_path)?;
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| config.export.posts_path());

        tracing::info!(topic_id = %topic_id, output = %path.display(), "Starting post export");

        let url = client.api_url(&format!(
            "community/topics/{topic_id}/posts?page[size]=100"
        ));
        let mut sink = JsonFileSink::new(&path);

        let outcome = PaginatedCollector::new(&client, CommunityPostSource)
            .run(url, &mut sink)
            .await?;

        report(&outcome, "posts", &path);
        Ok(0)
    }
}

fn report(outcome: &CollectionOutcome, noun: &str, path: &std::path::Path) {
    match outcome.summary() {
        Some(summary) => println!(
            "Exported {} {} to {} ({} pages, {} duplicates removed)",
            summary.records_delivered,
            noun,
            path.display(),
            summary.pages_fetched,
            summary.duplicates_collapsed
        ),
        None => print_abort(outcome),
    }
}

fn non_empty(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BulkError::Configuration(format!("{name} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Parses Unix seconds or an RFC 3339 timestamp into Unix seconds
pub fn parse_start_time(input: &str) -> Result<i64> {
    let input = input.trim();

    if let Ok(secs) = input.parse::<i64>() {
        if secs < 0 {
            return Err(BulkError::Configuration(format!(
                "start time cannot be negative: {secs}"
            )));
        }
        return Ok(secs);
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.timestamp())
        .map_err(|_| {
            BulkError::Configuration(format!(
                "Invalid start time '{input}': expected Unix seconds or RFC 3339"
            ))
        })
}
