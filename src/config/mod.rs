//! Configuration management.
//!
//! # Overview
//!
//! Configuration comes from an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment overrides (`ZENDESK_SUBDOMAIN`, `ZENDESK_EMAIL`, `ZENDESK_API_TOKEN`,
//!   and `ZENDESK_BULK_*` for everything else)
//! - Default values for every optional setting
//! - Validation on load
//!
//! A missing file is not an error: the tool then runs from defaults plus environment.
//!
//! # Configuration Structure
//!
//! - [`ZendeskConfig`] - Account, credentials and connection settings
//! - [`BatchConfig`] - Batch stagger and size limit
//! - [`RetryConfig`] - Rate-limit fallback delay
//! - [`ExportConfig`] - Export output locations
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [zendesk]
//! subdomain = "acme"
//! email = "agent@acme.com"
//! api_token = "${ZENDESK_API_TOKEN}"
//!
//! [batch]
//! stagger_ms = 1200
//!
//! [export]
//! output_dir = "./exports"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_logging_config};
pub use schema::{BatchConfig, BulkConfig, ExportConfig, LoggingConfig, RetryConfig, ZendeskConfig};
pub use secret::{secret_string, SecretString, SecretValue};
