//! Staggered batch execution
//!
//! Items are partitioned in order into batches no larger than the endpoint allows.
//! Batch `i` is released at `(i + 1) * stagger` after the run starts; every batch is
//! driven on the current task, so requests may overlap once released. A rate-limited
//! batch waits and re-issues only its own request.

use super::plan::BatchPlan;
use super::report::{BatchOutcome, BatchReport, BatchStatus, AUTHENTICATION_DIAGNOSTIC};
use crate::adapters::zendesk::ZendeskClient;
use crate::domain::{ApiError, BulkError, Result};
use crate::log_batch_start;
use futures::future::join_all;
use std::time::Duration;
use tokio::time::Instant;

/// Splits `items` into ordered chunks of at most `max` items
///
/// # Example
///
/// ```
/// use zendesk_bulk::core::batch::partition;
///
/// let items: Vec<u32> = (1..=250).collect();
/// let batches = partition(&items, 100).unwrap();
/// assert_eq!(batches.len(), 3);
/// assert_eq!(batches[2].len(), 50);
/// ```
pub fn partition<I>(items: &[I], max: usize) -> Result<Vec<&[I]>> {
    if max == 0 {
        return Err(BulkError::Configuration(
            "batch size must be at least 1".to_string(),
        ));
    }
    Ok(items.chunks(max).collect())
}

/// Chooses the batch size: the override if given, else the endpoint ceiling
///
/// An override above the ceiling is a configuration error.
pub fn resolve_batch_size(requested: Option<usize>, ceiling: usize) -> Result<usize> {
    match requested {
        None => Ok(ceiling),
        Some(0) => Err(BulkError::Configuration(
            "batch size must be at least 1".to_string(),
        )),
        Some(size) if size > ceiling => Err(BulkError::Configuration(format!(
            "batch size {size} exceeds the endpoint maximum of {ceiling}"
        ))),
        Some(size) => Ok(size),
    }
}

/// Issues one request per batch with a fixed stagger
pub struct BatchExecutor<'a> {
    client: &'a ZendeskClient,
    stagger: Duration,
}

impl<'a> BatchExecutor<'a> {
    pub fn new(client: &'a ZendeskClient, stagger: Duration) -> Self {
        Self { client, stagger }
    }

    /// Runs every batch to an outcome
    ///
    /// Fails only on input problems detected before any request is sent. Per-batch
    /// failures are reported in the returned [`BatchReport`].
    pub async fn run<I, P>(
        &self,
        items: &[I],
        batch_size: Option<usize>,
        plan: &P,
    ) -> Result<BatchReport>
    where
        P: BatchPlan<I>,
    {
        if items.is_empty() {
            return Err(BulkError::Configuration(
                "at least one identifier required".to_string(),
            ));
        }

        let endpoint = plan.endpoint();
        let size = resolve_batch_size(batch_size, endpoint.max_batch_size)?;
        let batches = partition(items, size)?;
        let total = batches.len();

        tracing::info!(
            method = %endpoint.method,
            path = endpoint.path,
            items = items.len(),
            batches = total,
            batch_size = size,
            "Dispatching batches"
        );

        let start = Instant::now();
        let runs = batches.iter().enumerate().map(|(index, batch)| async move {
            let release = start + self.stagger * (index as u32 + 1);
            tokio::time::sleep_until(release).await;
            log_batch_start!(index, total, batch.len());
            self.run_batch(index, batch, plan).await
        });

        let outcomes = join_all(runs).await;
        let report = BatchReport::new(outcomes, start.elapsed());
        report.log_summary();
        Ok(report)
    }

    async fn run_batch<I, P>(&self, index: usize, batch: &[I], plan: &P) -> BatchOutcome
    where
        P: BatchPlan<I>,
    {
        let items: Vec<String> = batch.iter().map(|item| plan.label(item)).collect();

        let status = match plan.request(self.client, batch) {
            Err(e) => BatchStatus::Failed(e.to_string()),
            Ok(request) => match self.client.execute(&request).await {
                Ok(response) => {
                    let message = plan.success_message(batch, &response);
                    let unresolved = plan.unresolved(batch, &response);
                    if unresolved.is_empty() {
                        BatchStatus::Succeeded { message }
                    } else {
                        BatchStatus::Partial {
                            message,
                            unresolved,
                        }
                    }
                }
                Err(ApiError::NotFound(_)) => BatchStatus::NotFound {
                    message: plan.not_found_message(batch),
                },
                Err(e) if e.is_authentication() => BatchStatus::AuthenticationFailed(e.to_string()),
                Err(e) => BatchStatus::Failed(e.to_string()),
            },
        };

        let outcome = BatchOutcome {
            index,
            items,
            status,
        };
        log_outcome(&outcome);
        outcome
    }
}

fn log_outcome(outcome: &BatchOutcome) {
    let batch = outcome.index + 1;
    match &outcome.status {
        BatchStatus::Succeeded { message } => {
            tracing::info!(batch, items = outcome.items.len(), "{message}");
        }
        BatchStatus::Partial { unresolved, .. } => {
            tracing::warn!(
                batch,
                unresolved = unresolved.len(),
                "Batch partially processed"
            );
            for item in unresolved {
                tracing::warn!(batch, item = %item.item, reason = %item.reason, "Item not processed");
            }
        }
        BatchStatus::NotFound { message } => {
            tracing::warn!(batch, "{message}");
        }
        BatchStatus::AuthenticationFailed(error) => {
            tracing::error!(batch, error = %error, "{AUTHENTICATION_DIAGNOSTIC}");
        }
        BatchStatus::Failed(error) => {
            tracing::error!(batch, items = %outcome.items.join(","), error = %error, "Batch failed");
        }
    }
}
