//! Rate-limit aware retry policy
//!
//! A 429 response is retried after the delay the server declares in `Retry-After`,
//! with the identical request and without growth or an attempt ceiling. Every other
//! status is classified once and handed back to the caller.

use crate::adapters::zendesk::ApiResponse;
use crate::config::RetryConfig;
use crate::domain::{ApiError, ApiResult};
use crate::log_rate_limited;
use std::future::Future;
use std::time::Duration;

/// What to do with a response
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// 2xx, hand the response to the caller
    Proceed(ApiResponse),
    /// 429, wait and re-issue the same request
    RetryAfter(Duration),
    /// Non-retryable status
    Abort(ApiError),
}

/// Retry behaviour shared by the batch executor and the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    fallback_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl RetryPolicy {
    /// `fallback_delay` applies when `Retry-After` is missing or unparseable
    pub fn new(fallback_delay: Duration) -> Self {
        Self { fallback_delay }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(Duration::from_secs(config.fallback_delay_secs))
    }

    pub fn fallback_delay(&self) -> Duration {
        self.fallback_delay
    }

    /// Classifies a response by status
    pub fn classify(&self, response: ApiResponse) -> Verdict {
        if response.is_success() {
            return Verdict::Proceed(response);
        }

        if response.status == 429 {
            return Verdict::RetryAfter(self.delay_for(&response));
        }

        Verdict::Abort(ApiError::from_status(response.status, &response.text()))
    }

    /// Delay declared by a 429 response
    pub fn delay_for(&self, response: &ApiResponse) -> Duration {
        match response.header("retry-after").and_then(parse_retry_after) {
            Some(delay) => delay,
            None => {
                tracing::warn!(
                    retry_after = ?response.header("retry-after"),
                    fallback_secs = self.fallback_delay.as_secs(),
                    "Missing or unreadable Retry-After header, using fallback delay"
                );
                self.fallback_delay
            }
        }
    }

    /// Runs `attempt` until it yields something other than a rate limit
    ///
    /// `attempt` must issue the same request on each call. Transport errors are not
    /// retried.
    pub async fn execute<F, Fut>(&self, url: &str, mut attempt: F) -> ApiResult<ApiResponse>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<ApiResponse>>,
    {
        let mut retries: u32 = 0;

        loop {
            let response = attempt().await?;

            match self.classify(response) {
                Verdict::Proceed(response) => return Ok(response),
                Verdict::Abort(error) => return Err(error),
                Verdict::RetryAfter(delay) => {
                    retries += 1;
                    log_rate_limited!(url, delay, retries);
                    tokio::time::sleep(delay).await;
                    tracing::info!(
                        url = %url,
                        attempt = retries + 1,
                        "Retrying after waiting for {} seconds",
                        delay.as_secs_f64()
                    );
                }
            }
        }
    }
}

/// Parses `Retry-After` as non-negative integer or decimal seconds
///
/// HTTP-date values are not used by the Zendesk API and are treated as unparseable,
/// as are values too large for a [`Duration`].
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
