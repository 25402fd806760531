//! # feed-loader
//!
//! Loads a remote JSON feed of images and hands back typed domain models.
//!
//! ## Design Philosophy
//!
//! feed-loader is designed to be:
//! - **Transport-agnostic** - requests go through the [`HttpClient`] trait; the
//!   reqwest-backed [`ReqwestHttpClient`] is just one implementation
//! - **Strict** - a payload either decodes completely or is rejected
//! - **Two errors only** - callers see [`LoadError::Connectivity`] or
//!   [`LoadError::InvalidData`], never transport internals
//! - **Drop to cancel** - dropping a [`RemoteFeedLoader`] stops any pending
//!   delivery
//!
//! ## Quick Start
//!
//! ```no_run
//! use feed_loader::{AsyncFeedLoader, Config, RemoteFeedLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://example.com/feed.json".parse()?);
//!     let loader = RemoteFeedLoader::from_config(&config)?;
//!
//!     for image in loader.load_feed().await? {
//!         println!("{} -> {}", image.id, image.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Feed image domain model
pub mod feed_image;
/// Feed payload decoding
pub mod feed_items_mapper;
/// Transport capability
pub mod http_client;
/// Feed loading
pub mod remote_feed_loader;
/// reqwest-backed transport
pub mod reqwest_client;
/// Transport test doubles
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

// Re-export commonly used types
pub use config::{Config, HttpClientConfig};
pub use error::{Error, HttpClientError, LoadError, Result};
pub use feed_image::FeedImage;
pub use http_client::{HttpClient, HttpClientResult, HttpCompletion, HttpPayload, HttpResponse};
pub use remote_feed_loader::{
    AsyncFeedLoader, FeedLoader, LoadCompletion, LoadResult, RemoteFeedLoader,
};
pub use reqwest_client::ReqwestHttpClient;
