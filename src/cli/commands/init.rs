//! Init command implementation
//!
//! Writes a commented sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "zendesk-bulk.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set ZENDESK_SUBDOMAIN, ZENDESK_EMAIL and ZENDESK_API_TOKEN");
                println!("     (in the environment or a .env file)");
                println!("  2. Validate configuration: zendesk-bulk validate-config");
                println!("  3. Run a command, e.g.: zendesk-bulk tickets show 1,2,3");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# zendesk-bulk configuration
#
# Every value can also be supplied through the environment:
#   ZENDESK_SUBDOMAIN, ZENDESK_EMAIL, ZENDESK_API_TOKEN
#   ZENDESK_BULK_<SECTION>_<KEY>, e.g. ZENDESK_BULK_BATCH_STAGGER_MS=2000

[zendesk]
subdomain = "${ZENDESK_SUBDOMAIN}"
email = "${ZENDESK_EMAIL}"
api_token = "${ZENDESK_API_TOKEN}"

# Send requests somewhere other than https://<subdomain>.zendesk.com
# base_url = "http://localhost:8080"

timeout_seconds = 60

[batch]
# Batch i starts (i + 1) * stagger_ms after the run begins
stagger_ms = 1200

# Cap on items per request; endpoint maximums still apply
# max_batch_size = 50

[retry]
# Wait used when a 429 response has no usable Retry-After header
fallback_delay_secs = 60

[export]
output_dir = "."
tickets_file = "tickets_exported.json"
posts_file = "posts_exported.json"

[logging]
level = "info"
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BulkConfig;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses() {
        // ${VAR} placeholders are plain strings to the TOML parser
        let config: BulkConfig = toml::from_str(InitArgs::sample_config()).unwrap();
        assert_eq!(config.batch.stagger_ms, 1200);
        assert_eq!(config.export.tickets_file, "tickets_exported.json");
    }

    #[tokio::test]
    async fn test_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zendesk-bulk.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[zendesk]"));
    }
}
