//! External system adapters
//!
//! The only external system is the Zendesk REST API. Everything above this layer
//! speaks in [`zendesk::ApiRequest`] and [`zendesk::ApiResponse`], so the transport
//! can be replaced in tests.
//!
//! ```rust,no_run
//! use zendesk_bulk::adapters::zendesk::{ApiRequest, ZendeskClient};
//! use zendesk_bulk::config::BulkConfig;
//!
//! # async fn example(config: BulkConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let client = ZendeskClient::from_config(&config)?;
//! let request = ApiRequest::get(client.api_url("search.json?query=type:ticket"));
//! let response = client.execute(&request).await?;
//! println!("status {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod zendesk;
