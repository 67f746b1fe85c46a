//! Zendesk API client
//!
//! Holds the account base URL, the Authorization header and the transport. Requests
//! are built by the callers; the client attaches credentials and applies the retry
//! policy.

use super::auth::Credentials;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
use crate::config::{BulkConfig, SecretString};
use crate::core::retry::RetryPolicy;
use crate::domain::{ApiResult, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;
use url::Url;

/// Authenticated client for one Zendesk account
pub struct ZendeskClient {
    base_url: String,
    authorization: SecretString,
    transport: Arc<dyn HttpTransport>,
    retry: RetryPolicy,
}

impl ZendeskClient {
    /// Builds a `reqwest`-backed client from configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zendesk_bulk::adapters::zendesk::ZendeskClient;
    /// use zendesk_bulk::config::load_config;
    ///
    /// # fn example() -> zendesk_bulk::domain::Result<()> {
    /// let config = load_config("zendesk-bulk.toml")?;
    /// let client = ZendeskClient::from_config(&config)?;
    /// println!("{}", client.api_url("tickets/show_many.json"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &BulkConfig) -> Result<Self> {
        let credentials = Credentials::from_config(&config.zendesk)?;
        let transport = ReqwestTransport::new(config.zendesk.timeout())?;

        tracing::debug!(
            base_url = %config.zendesk.resolved_base_url(),
            email = %credentials.email(),
            "Created Zendesk client"
        );

        Ok(Self::with_transport(
            config.zendesk.resolved_base_url(),
            &credentials,
            Arc::new(transport),
            RetryPolicy::from_config(&config.retry),
        ))
    }

    /// Builds a client over an arbitrary transport
    pub fn with_transport(
        base_url: impl Into<String>,
        credentials: &Credentials,
        transport: Arc<dyn HttpTransport>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authorization: credentials.authorization_header(),
            transport,
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Absolute URL for a path under `/api/v2/`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Whether `url` has the scheme, host and port of the account base URL
    ///
    /// Credentials are only ever sent to URLs that pass this check.
    pub fn is_same_origin(&self, url: &str) -> bool {
        match (Url::parse(&self.base_url), Url::parse(url)) {
            (Ok(base), Ok(other)) => base.origin() == other.origin(),
            _ => false,
        }
    }

    /// Sends a request once with credentials attached; any status comes back as `Ok`
    pub async fn send_once(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let authorized = request.clone().with_header(
            "Authorization",
            self.authorization.expose_secret().as_str(),
        );

        tracing::trace!(method = %request.method, url = %request.url, "Sending request");
        self.transport.send(authorized).await
    }

    /// Sends a request, waiting out rate limits, and classifies the final status
    pub async fn execute(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        self.retry
            .execute(&request.url, || self.send_once(request))
            .await
    }
}
