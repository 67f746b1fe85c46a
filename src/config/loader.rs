//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BulkConfig;
use super::secret::secret_string;
use crate::domain::errors::BulkError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file (a missing file yields the defaults)
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`BulkConfig`]
/// 4. Applies environment variable overrides (`ZENDESK_*` and `ZENDESK_BULK_*`)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File exists but cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use zendesk_bulk::config::loader::load_config;
///
/// let config = load_config("zendesk-bulk.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BulkConfig> {
    let mut config = read_config(path)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BulkError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Reads and parses the TOML file without applying overrides or validating
fn read_config(path: impl AsRef<Path>) -> Result<BulkConfig> {
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using defaults and environment"
        );
        return Ok(BulkConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BulkError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    toml::from_str(&contents)
        .map_err(|e| BulkError::Configuration(format!("Failed to parse TOML: {e}")))
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BulkError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// Account credentials use the `ZENDESK_SUBDOMAIN`, `ZENDESK_EMAIL` and
/// `ZENDESK_API_TOKEN` variables. Everything else follows the pattern
/// `ZENDESK_BULK_<SECTION>_<KEY>`.
fn apply_env_overrides(config: &mut BulkConfig) -> Result<()> {
    // Account overrides
    if let Ok(val) = std::env::var("ZENDESK_SUBDOMAIN") {
        config.zendesk.subdomain = val;
    }
    if let Ok(val) = std::env::var("ZENDESK_EMAIL") {
        config.zendesk.email = val;
    }
    if let Ok(val) = std::env::var("ZENDESK_API_TOKEN") {
        config.zendesk.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("ZENDESK_BULK_BASE_URL") {
        config.zendesk.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("ZENDESK_BULK_TIMEOUT_SECONDS") {
        config.zendesk.timeout_seconds = parse_override("ZENDESK_BULK_TIMEOUT_SECONDS", &val)?;
    }

    // Batch overrides
    if let Ok(val) = std::env::var("ZENDESK_BULK_BATCH_STAGGER_MS") {
        config.batch.stagger_ms = parse_override("ZENDESK_BULK_BATCH_STAGGER_MS", &val)?;
    }
    if let Ok(val) = std::env::var("ZENDESK_BULK_BATCH_MAX_SIZE") {
        config.batch.max_batch_size = Some(parse_override("ZENDESK_BULK_BATCH_MAX_SIZE", &val)?);
    }

    // Retry overrides
    if let Ok(val) = std::env::var("ZENDESK_BULK_RETRY_FALLBACK_DELAY_SECS") {
        config.retry.fallback_delay_secs =
            parse_override("ZENDESK_BULK_RETRY_FALLBACK_DELAY_SECS", &val)?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("ZENDESK_BULK_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ZENDESK_BULK_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("ZENDESK_BULK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ZENDESK_BULK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        BulkError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}

/// Loads the logging section only, ignoring credential validation
///
/// Used at startup so logging can be initialized before a command decides
/// whether its configuration is complete.
pub fn load_logging_config(path: impl AsRef<Path>) -> super::LoggingConfig {
    let mut config = read_config(path).unwrap_or_default();
    if apply_env_overrides(&mut config).is_err() {
        return super::LoggingConfig::default();
    }
    config.logging
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ZB_LOADER_TEST_VAR", "test_value");
        let input = "api_token = \"${ZB_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_token = \"test_value\"\n");
        std::env::remove_var("ZB_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ZB_LOADER_MISSING_VAR");
        let input = "api_token = \"${ZB_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("ZB_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# api_token = \"${ZB_LOADER_NEVER_SET}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_read_config_missing_file_uses_defaults() {
        let config = read_config("definitely-not-here.toml").unwrap();
        assert_eq!(config.batch.stagger_ms, 1200);
    }

    #[test]
    fn test_read_config_parses_sections() {
        let toml_content = r#"
[zendesk]
subdomain = "acme"
email = "agent@acme.test"
api_token = "secret"

[batch]
stagger_ms = 500
max_batch_size = 50

[export]
output_dir = "/tmp/out"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = read_config(temp_file.path()).unwrap();
        assert_eq!(config.zendesk.subdomain, "acme");
        assert_eq!(config.batch.stagger_ms, 500);
        assert_eq!(config.batch.max_batch_size, Some(50));
        assert_eq!(config.export.output_dir, "/tmp/out");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_read_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[zendesk\nsubdomain = ").unwrap();
        temp_file.flush().unwrap();

        let err = read_config(temp_file.path()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override::<u64>("X", " 15 ").unwrap(), 15);
        assert!(parse_override::<u64>("X", "fifteen").is_err());
    }
}
