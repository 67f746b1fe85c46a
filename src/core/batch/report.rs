//! Batch outcomes and the run summary

use super::plan::Unresolved;
use std::time::Duration;

/// Diagnostic printed when the server rejects the credentials
pub const AUTHENTICATION_DIAGNOSTIC: &str =
    "Authentication failed. Please check your API credentials.";

/// Result of one batch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every item was processed
    Succeeded { message: String },
    /// The request succeeded but some items were not processed
    Partial {
        message: String,
        unresolved: Vec<Unresolved>,
    },
    /// 404 for the batch; the items do not exist or were already processed
    NotFound { message: String },
    /// 401/403; not retried
    AuthenticationFailed(String),
    /// Any other non-retryable failure
    Failed(String),
}

impl BatchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchStatus::Succeeded { .. })
    }
}

/// One batch and what happened to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Zero-based position of the batch in the partition
    pub index: usize,
    /// Labels of the items in the batch
    pub items: Vec<String>,
    pub status: BatchStatus,
}

impl BatchOutcome {
    /// Human-readable line(s) for the console
    pub fn message(&self) -> String {
        match &self.status {
            BatchStatus::Succeeded { message } => message.clone(),
            BatchStatus::Partial {
                message,
                unresolved,
            } => {
                let mut lines = vec![message.clone()];
                lines.extend(
                    unresolved
                        .iter()
                        .map(|u| format!("[{}] not processed: {}", u.item, u.reason)),
                );
                lines.join("\n")
            }
            BatchStatus::NotFound { message } => message.clone(),
            BatchStatus::AuthenticationFailed(_) => AUTHENTICATION_DIAGNOSTIC.to_string(),
            BatchStatus::Failed(reason) => {
                format!("[{}] Request failed: {}", self.items.join(","), reason)
            }
        }
    }
}

/// Summary of a bulk run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Outcomes ordered by batch index
    pub outcomes: Vec<BatchOutcome>,
    pub duration: Duration,
}

impl BatchReport {
    pub fn new(mut outcomes: Vec<BatchOutcome>, duration: Duration) -> Self {
        outcomes.sort_by_key(|o| o.index);
        Self { outcomes, duration }
    }

    pub fn total_batches(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_items(&self) -> usize {
        self.outcomes.iter().map(|o| o.items.len()).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, BatchStatus::Succeeded { .. }))
    }

    pub fn partial(&self) -> usize {
        self.count(|s| matches!(s, BatchStatus::Partial { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|s| matches!(s, BatchStatus::NotFound { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                BatchStatus::Failed(_) | BatchStatus::AuthenticationFailed(_)
            )
        })
    }

    /// Items reported as not processed across all partial batches
    pub fn unresolved(&self) -> impl Iterator<Item = &Unresolved> {
        self.outcomes.iter().flat_map(|o| match &o.status {
            BatchStatus::Partial { unresolved, .. } => unresolved.as_slice(),
            _ => &[][..],
        })
    }

    pub fn is_successful(&self) -> bool {
        self.outcomes.iter().all(|o| o.status.is_success())
    }

    fn count(&self, predicate: impl Fn(&BatchStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }

    pub fn log_summary(&self) {
        tracing::info!(
            batches = self.total_batches(),
            items = self.total_items(),
            succeeded = self.succeeded(),
            partial = self.partial(),
            not_found = self.not_found(),
            failed = self.failed(),
            duration_secs = self.duration.as_secs_f64(),
            "Bulk run completed"
        );

        if !self.is_successful() {
            tracing::warn!(
                problem_batches = self.total_batches() - self.succeeded(),
                "Bulk run completed with problems"
            );
        }
    }
}
