//! Validate config command implementation
//!
//! Loads the configuration file (plus environment overrides), validates it and prints
//! a summary with the API token masked.

use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let token = config
            .zendesk
            .api_token
            .as_ref()
            .map(|t| t.expose_secret().masked())
            .unwrap_or_else(|| "(not set)".to_string());

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  API Base URL: {}", config.zendesk.resolved_base_url());
        println!("  Email: {}", config.zendesk.email);
        println!("  API Token: {token}");
        println!("  Timeout: {}s", config.zendesk.timeout_seconds);
        println!("  Batch Stagger: {}ms", config.batch.stagger_ms);
        match config.batch.max_batch_size {
            Some(max) => println!("  Max Batch Size: {max}"),
            None => println!("  Max Batch Size: endpoint maximum"),
        }
        println!(
            "  Retry-After Fallback: {}s",
            config.retry.fallback_delay_secs
        );
        println!("  Ticket Export File: {}", config.export.tickets_path().display());
        println!("  Post Export File: {}", config.export.posts_path().display());
        println!("  Log Level: {}", config.logging.level);
        println!();
        Ok(0)
    }
}
