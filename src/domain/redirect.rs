//! Help Center redirect rules loaded from a YAML rule file
//!
//! The rule file is a plain YAML list:
//!
//! ```yaml
//! - redirect_from: /hc/en-us/articles/123-Old-title
//!   redirect_status: 301
//!   redirect_to: /hc/en-us/articles/456-New-title
//! ```

use super::errors::BulkError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A single redirect rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub redirect_from: String,
    pub redirect_status: u16,
    pub redirect_to: String,
}

impl RedirectRule {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.redirect_from.trim().is_empty() {
            return Err("redirect_from cannot be empty".to_string());
        }
        if self.redirect_to.trim().is_empty() {
            return Err("redirect_to cannot be empty".to_string());
        }
        if !(300..=399).contains(&self.redirect_status) {
            return Err(format!(
                "redirect_status must be a 3xx status, got {}",
                self.redirect_status
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RedirectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} -> {}",
            self.redirect_status, self.redirect_from, self.redirect_to
        )
    }
}

/// Ordered, non-empty set of redirect rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet(Vec<RedirectRule>);

impl RuleSet {
    /// Parses and validates a YAML rule list
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let rules: Vec<RedirectRule> = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_yaml::from_str::<Option<Vec<RedirectRule>>>(contents)?.unwrap_or_default()
        };

        if rules.is_empty() {
            return Err(BulkError::Configuration(
                "There are 0 redirects. Please add at least one redirect in the redirect configuration file."
                    .to_string(),
            ));
        }

        for (index, rule) in rules.iter().enumerate() {
            rule.validate().map_err(|e| {
                BulkError::Configuration(format!("Invalid redirect rule #{}: {e}", index + 1))
            })?;
        }

        Ok(Self(rules))
    }

    /// Reads a YAML rule file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BulkError::Configuration(format!(
                "Failed to read redirect file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&contents)
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RULES: &str = r#"
- redirect_from: /hc/en-us/articles/1-old
  redirect_status: 301
  redirect_to: /hc/en-us/articles/2-new
- redirect_from: /hc/en-us/sections/9
  redirect_status: 302
  redirect_to: https://example.com/help
"#;

    #[test]
    fn test_parse_rules_in_order() {
        let set = RuleSet::from_yaml(RULES).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0].redirect_status, 301);
        assert_eq!(set.rules()[1].redirect_to, "https://example.com/help");
    }

    #[test]
    fn test_empty_rule_file() {
        let err = RuleSet::from_yaml("").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("at least one redirect"));

        let err = RuleSet::from_yaml("[]").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_status() {
        let yaml = "- {redirect_from: /a, redirect_status: 200, redirect_to: /b}";
        let err = RuleSet::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("rule #1"));
    }

    #[test]
    fn test_display() {
        let set = RuleSet::from_yaml(RULES).unwrap();
        assert_eq!(
            set.rules()[0].to_string(),
            "[301] /hc/en-us/articles/1-old -> /hc/en-us/articles/2-new"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(RULES.as_bytes()).unwrap();
        file.flush().unwrap();

        let set = RuleSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleSet::load("does-not-exist.yml").unwrap_err();
        assert!(err.is_configuration());
    }
}
