//! Paginated collection as an explicit state machine
//!
//! ```text
//! Fetching --429--> Waiting --delay--> Fetching (same URL)
//! Fetching --records, more--> Fetching (next URL)
//! Fetching --no records | no more | result cap--> Finalizing
//! Fetching --401/403 | transport | malformed | other status--> Aborted
//! Fetching --next URL on another origin--> Aborted
//! ```
//!
//! Pages are fetched strictly one after another. The sink is called exactly once, and
//! only from `Finalizing`.

use super::accumulator::Accumulator;
use super::filter::RecordFilter;
use super::source::PageSource;
use crate::adapters::zendesk::{ApiRequest, ZendeskClient};
use crate::core::batch::AUTHENTICATION_DIAGNOSTIC;
use crate::core::retry::Verdict;
use crate::core::sink::RecordSink;
use crate::domain::{ApiError, BulkError, Result};
use crate::log_rate_limited;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

/// Where the collector is in its walk
#[derive(Debug)]
pub enum CollectorState {
    Fetching { url: String },
    Waiting { url: String, delay: Duration },
    Finalizing { truncated: bool },
    Aborted { error: BulkError },
}

/// Counters for a completed collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub pages_fetched: usize,
    /// Records received before filtering
    pub records_received: usize,
    /// Records that passed the filter, duplicates included
    pub records_matched: usize,
    /// Records handed to the sink
    pub records_delivered: usize,
    pub duplicates_collapsed: usize,
    /// The server's result cap ended the walk early
    pub truncated: bool,
    pub duration: Duration,
}

impl CollectionSummary {
    pub fn log_summary(&self, source: &str) {
        tracing::info!(
            source,
            pages = self.pages_fetched,
            received = self.records_received,
            matched = self.records_matched,
            delivered = self.records_delivered,
            duplicates_collapsed = self.duplicates_collapsed,
            truncated = self.truncated,
            duration_secs = self.duration.as_secs_f64(),
            "Collection completed"
        );
    }
}

/// How a collection run ended
#[derive(Debug)]
pub enum CollectionOutcome {
    Completed(CollectionSummary),
    /// Nothing was delivered
    Aborted {
        error: BulkError,
        pages_fetched: usize,
    },
}

impl CollectionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CollectionOutcome::Completed(_))
    }

    pub fn summary(&self) -> Option<&CollectionSummary> {
        match self {
            CollectionOutcome::Completed(summary) => Some(summary),
            CollectionOutcome::Aborted { .. } => None,
        }
    }
}

/// Walks one paginated source to exhaustion
pub struct PaginatedCollector<'a, S> {
    client: &'a ZendeskClient,
    source: S,
    filter: RecordFilter,
}

impl<'a, S: PageSource> PaginatedCollector<'a, S> {
    pub fn new(client: &'a ZendeskClient, source: S) -> Self {
        Self {
            client,
            source,
            filter: RecordFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Collects from `start_url` and delivers to `sink`
    ///
    /// API and parse failures end in [`CollectionOutcome::Aborted`]; only a sink
    /// failure is returned as `Err`.
    pub async fn run(
        &self,
        start_url: impl Into<String>,
        sink: &mut dyn RecordSink,
    ) -> Result<CollectionOutcome> {
        let name = self.source.name().to_string();
        let started = Instant::now();
        let mut accumulator = Accumulator::new(self.source.dedup());
        let mut summary = CollectionSummary::default();
        let mut retries: u32 = 0;

        let mut state = CollectorState::Fetching {
            url: start_url.into(),
        };

        loop {
            state = match state {
                CollectorState::Fetching { url } => {
                    tracing::info!(source = %name, "Sending request to {url}");
                    let request = ApiRequest::get(url.clone());

                    match self.client.send_once(&request).await {
                        Err(error) => CollectorState::Aborted {
                            error: error.into(),
                        },
                        Ok(response) => match self.client.retry_policy().classify(response) {
                            Verdict::RetryAfter(delay) => CollectorState::Waiting { url, delay },
                            Verdict::Abort(error) if self.source.is_result_cap(&error) => {
                                tracing::warn!(
                                    source = %name,
                                    status = ?error.status(),
                                    "We reached the limit of total search results, finishing with what was collected"
                                );
                                CollectorState::Finalizing { truncated: true }
                            }
                            Verdict::Abort(error) => CollectorState::Aborted {
                                error: error.into(),
                            },
                            Verdict::Proceed(response) => {
                                retries = 0;
                                summary.pages_fetched += 1;

                                let page = response
                                    .json::<Value>()
                                    .map_err(BulkError::from)
                                    .and_then(|body| self.source.parse(&body));

                                match page {
                                    Err(error) => CollectorState::Aborted { error },
                                    Ok(page) if page.records.is_empty() => {
                                        CollectorState::Finalizing { truncated: false }
                                    }
                                    Ok(page) => {
                                        let next = self.source.termination().next_url(&page);
                                        summary.records_received += page.records.len();

                                        let matched = self.filter.apply(page.records);
                                        summary.records_matched += matched.len();
                                        accumulator.merge(matched);

                                        tracing::debug!(
                                            source = %name,
                                            page = summary.pages_fetched,
                                            distinct = accumulator.len(),
                                            "Merged page"
                                        );

                                        match next {
                                            Some(next) if !self.client.is_same_origin(&next) => {
                                                CollectorState::Aborted {
                                                    error: ApiError::InvalidResponse(format!(
                                                        "next page URL {next} is outside {}",
                                                        self.client.base_url()
                                                    ))
                                                    .into(),
                                                }
                                            }
                                            Some(next) => {
                                                tracing::info!(
                                                    source = %name,
                                                    "Requesting next page from {next}"
                                                );
                                                CollectorState::Fetching { url: next }
                                            }
                                            None => CollectorState::Finalizing { truncated: false },
                                        }
                                    }
                                }
                            }
                        },
                    }
                }

                CollectorState::Waiting { url, delay } => {
                    retries += 1;
                    log_rate_limited!(url, delay, retries);
                    tokio::time::sleep(delay).await;
                    tracing::info!(
                        source = %name,
                        "Retrying after waiting for {} seconds",
                        delay.as_secs_f64()
                    );
                    CollectorState::Fetching { url }
                }

                CollectorState::Finalizing { truncated } => {
                    summary.truncated = truncated;
                    summary.duplicates_collapsed = accumulator.duplicates_collapsed();
                    let records = accumulator.drain();
                    summary.records_delivered = records.len();

                    sink.deliver(records).await?;

                    summary.duration = started.elapsed();
                    summary.log_summary(&name);
                    return Ok(CollectionOutcome::Completed(summary));
                }

                CollectorState::Aborted { error } => {
                    drop(accumulator);
                    log_abort(&name, &error);
                    return Ok(CollectionOutcome::Aborted {
                        error,
                        pages_fetched: summary.pages_fetched,
                    });
                }
            };
        }
    }
}

fn log_abort(source: &str, error: &BulkError) {
    match error {
        BulkError::Api(api) if api.is_authentication() => {
            tracing::error!(source, error = %api, "{AUTHENTICATION_DIAGNOSTIC}");
        }
        BulkError::Api(ApiError::Transport(reason)) => {
            tracing::error!(source, reason = %reason, "Request failed, collection aborted");
        }
        other => {
            tracing::error!(source, error = %other, "Collection aborted");
        }
    }
}
