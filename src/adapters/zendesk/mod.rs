//! Zendesk REST API adapter

pub mod auth;
pub mod client;
pub mod transport;

pub use auth::Credentials;
pub use client::ZendeskClient;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, ReqwestTransport};
