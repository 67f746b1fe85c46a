//! API token credentials
//!
//! Zendesk API token authentication is HTTP Basic with the user name
//! `{email}/token` and the token as password.

use crate::config::{secret_string, SecretString, ZendeskConfig};
use crate::domain::{BulkError, Result};
use base64::{engine::general_purpose, Engine as _};
use secrecy::ExposeSecret;

/// Account email and API token
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    api_token: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_token: SecretString) -> Self {
        Self {
            email: email.into(),
            api_token,
        }
    }

    /// Reads credentials from the account configuration
    pub fn from_config(config: &ZendeskConfig) -> Result<Self> {
        let api_token = config.api_token.clone().ok_or_else(|| {
            BulkError::Configuration("zendesk.api_token is not set".to_string())
        })?;
        Ok(Self::new(config.email.clone(), api_token))
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Builds the `Authorization` header value
    pub fn authorization_header(&self) -> SecretString {
        let raw = format!(
            "{}/token:{}",
            self.email,
            self.api_token.expose_secret().as_str()
        );
        let encoded = general_purpose::STANDARD.encode(raw.as_bytes());
        secret_string(format!("Basic {encoded}"))
    }
}
