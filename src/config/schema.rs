//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration
///
/// Every section is optional so the tool also runs from environment variables alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Zendesk account and connection settings
    #[serde(default)]
    pub zendesk: ZendeskConfig,

    /// Batch execution settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Rate-limit retry settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Export output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BulkConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.zendesk.validate()?;
        self.batch.validate()?;
        self.retry.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Zendesk account configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZendeskConfig {
    /// Account subdomain (`<subdomain>.zendesk.com`)
    #[serde(default)]
    pub subdomain: String,

    /// Agent email used for API token authentication
    #[serde(default)]
    pub email: String,

    /// API token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Explicit API base URL; overrides the subdomain (useful for proxies and tests)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ZendeskConfig {
    /// Base URL requests are issued against, without a trailing slash
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("https://{}.zendesk.com", self.subdomain),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        match &self.base_url {
            Some(url) if !url.trim().is_empty() => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err("zendesk.base_url must start with http:// or https://".to_string());
                }
            }
            _ => {
                if self.subdomain.trim().is_empty() {
                    return Err(
                        "zendesk.subdomain cannot be empty (set ZENDESK_SUBDOMAIN)".to_string()
                    );
                }
                if !self
                    .subdomain
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    return Err(format!(
                        "zendesk.subdomain '{}' may only contain letters, digits and '-'",
                        self.subdomain
                    ));
                }
            }
        }

        if self.email.trim().is_empty() {
            return Err("zendesk.email cannot be empty (set ZENDESK_EMAIL)".to_string());
        }

        if self
            .api_token
            .as_ref()
            .map(|token| token.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("zendesk.api_token cannot be empty (set ZENDESK_API_TOKEN)".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "zendesk.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }

        Ok(())
    }
}

impl Default for ZendeskConfig {
    fn default() -> Self {
        Self {
            subdomain: String::new(),
            email: String::new(),
            api_token: None,
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Batch execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Delay between batch start offsets in milliseconds
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,

    /// Upper bound on batch size; may not exceed an endpoint's ceiling
    #[serde(default)]
    pub max_batch_size: Option<usize>,
}

impl BatchConfig {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    fn validate(&self) -> Result<(), String> {
        if self.stagger_ms > 60_000 {
            return Err(format!(
                "batch.stagger_ms must be <= 60000, got {}",
                self.stagger_ms
            ));
        }
        if self.max_batch_size == Some(0) {
            return Err("batch.max_batch_size must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger_ms(),
            max_batch_size: None,
        }
    }
}

/// Rate-limit retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay used when a 429 response carries no usable Retry-After header
    #[serde(default = "default_fallback_delay_secs")]
    pub fallback_delay_secs: u64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fallback_delay_secs == 0 || self.fallback_delay_secs > 3600 {
            return Err(format!(
                "retry.fallback_delay_secs must be between 1 and 3600, got {}",
                self.fallback_delay_secs
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            fallback_delay_secs: default_fallback_delay_secs(),
        }
    }
}

/// Export output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name for the incremental ticket export
    #[serde(default = "default_tickets_file")]
    pub tickets_file: String,

    /// File name for the community post export
    #[serde(default = "default_posts_file")]
    pub posts_file: String,
}

impl ExportConfig {
    pub fn tickets_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.tickets_file)
    }

    pub fn posts_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(&self.posts_file)
    }

    fn validate(&self) -> Result<(), String> {
        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.tickets_file.is_empty() || self.posts_file.is_empty() {
            return Err("export file names cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            tickets_file: default_tickets_file(),
            posts_file: default_posts_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err(
                "logging.local_path cannot be empty when file logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

// Default value functions
fn default_timeout_seconds() -> u64 {
    60
}

fn default_stagger_ms() -> u64 {
    1200
}

fn default_fallback_delay_secs() -> u64 {
    60
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_tickets_file() -> String {
    "tickets_exported.json".to_string()
}

fn default_posts_file() -> String {
    "posts_exported.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> BulkConfig {
        BulkConfig {
            zendesk: ZendeskConfig {
                subdomain: "acme".to_string(),
                email: "agent@acme.test".to_string(),
                api_token: Some(secret_string("token".to_string())),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_resolved_base_url_from_subdomain() {
        let config = valid_config();
        assert_eq!(config.zendesk.resolved_base_url(), "https://acme.zendesk.com");
    }

    #[test]
    fn test_resolved_base_url_override() {
        let mut config = valid_config();
        config.zendesk.base_url = Some("http://127.0.0.1:1234/".to_string());
        assert_eq!(config.zendesk.resolved_base_url(), "http://127.0.0.1:1234");
        config.zendesk.subdomain = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_subdomain() {
        let mut config = valid_config();
        config.zendesk.subdomain = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.contains("ZENDESK_SUBDOMAIN"));
    }

    #[test]
    fn test_invalid_subdomain() {
        let mut config = valid_config();
        config.zendesk.subdomain = "acme.evil.com/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_token() {
        let mut config = valid_config();
        config.zendesk.api_token = None;
        assert!(config.validate().unwrap_err().contains("api_token"));

        config.zendesk.api_token = Some(secret_string(String::new()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url_scheme() {
        let mut config = valid_config();
        config.zendesk.base_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_validation() {
        let mut config = valid_config();
        config.batch.max_batch_size = Some(0);
        assert!(config.validate().is_err());

        config.batch.max_batch_size = Some(50);
        config.batch.stagger_ms = 120_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_validation() {
        let mut config = valid_config();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "DEBUG".to_string();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = BulkConfig::default();
        assert_eq!(config.batch.stagger(), Duration::from_millis(1200));
        assert_eq!(config.retry.fallback_delay_secs, 60);
        assert_eq!(
            config.export.tickets_path(),
            PathBuf::from("./tickets_exported.json")
        );
        assert_eq!(config.zendesk.timeout(), Duration::from_secs(60));
    }
}
