//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output on stderr
//! - Optional JSON log files with rotation
//! - Level from config, `--log-level`, or `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use zendesk_bulk::logging::init_logging;
//! use zendesk_bulk::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a rate-limit wait before a retry
///
/// # Example
///
/// ```no_run
/// use zendesk_bulk::log_rate_limited;
/// use std::time::Duration;
///
/// log_rate_limited!("https://acme.zendesk.com/api/v2/search.json", Duration::from_secs(2), 1);
/// ```
#[macro_export]
macro_rules! log_rate_limited {
    ($url:expr, $delay:expr, $attempt:expr) => {
        tracing::warn!(
            url = %$url,
            delay_secs = $delay.as_secs_f64(),
            attempt = $attempt,
            "Hit a rate limit, will wait for {:.0} seconds and try again",
            $delay.as_secs_f64()
        );
    };
}

/// Log the start of one batch
///
/// # Example
///
/// ```no_run
/// use zendesk_bulk::log_batch_start;
///
/// log_batch_start!(2, 5, 100);
/// ```
#[macro_export]
macro_rules! log_batch_start {
    ($index:expr, $total:expr, $size:expr) => {
        tracing::debug!(
            batch = $index + 1,
            total = $total,
            size = $size,
            progress_pct = (($index + 1) as f64 / $total as f64 * 100.0),
            "Starting batch"
        );
    };
}
