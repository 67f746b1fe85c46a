//! Core bulk-processing logic
//!
//! # Modules
//!
//! - [`batch`] - partition identifier lists and dispatch staggered batch requests
//! - [`collect`] - walk paginated endpoints, filter and deduplicate results
//! - [`retry`] - `Retry-After` driven rate-limit handling shared by both
//! - [`sink`] - destinations for finished collections
//!
//! # Example
//!
//! ```rust,no_run
//! use zendesk_bulk::adapters::zendesk::ZendeskClient;
//! use zendesk_bulk::config::load_config;
//! use zendesk_bulk::core::collect::{CommunityPostSource, PaginatedCollector};
//! use zendesk_bulk::core::sink::JsonFileSink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("zendesk-bulk.toml")?;
//! let client = ZendeskClient::from_config(&config)?;
//!
//! let url = client.api_url("community/topics/360001/posts?page[size]=100");
//! let mut sink = JsonFileSink::new(config.export.posts_path());
//!
//! let outcome = PaginatedCollector::new(&client, CommunityPostSource)
//!     .run(url, &mut sink)
//!     .await?;
//! println!("completed: {}", outcome.is_completed());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod collect;
pub mod retry;
pub mod sink;
