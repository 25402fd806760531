//! Remote feed loading
//!
//! [`RemoteFeedLoader`] issues one request per [`FeedLoader::load`] call and
//! turns the transport outcome into a [`LoadResult`]:
//!
//! 1. transport failure → [`LoadError::Connectivity`]
//! 2. non-200 status or malformed payload → [`LoadError::InvalidData`]
//! 3. otherwise → the decoded images, in payload order
//!
//! Dropping the loader cancels delivery: a completion that is still pending
//! when the loader goes away is never invoked. The network request itself is
//! not aborted.

use crate::config::Config;
use crate::error::{LoadError, Result};
use crate::feed_image::{self, FeedImage};
use crate::feed_items_mapper;
use crate::http_client::{HttpClient, HttpClientResult};
use crate::reqwest_client::ReqwestHttpClient;
use async_trait::async_trait;
use std::sync::{Arc, Weak};
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};
use url::Url;

/// Outcome of a feed load
pub type LoadResult = std::result::Result<Vec<FeedImage>, LoadError>;

/// One-shot completion handed to [`FeedLoader::load`]
pub type LoadCompletion = Box<dyn FnOnce(LoadResult) + Send + 'static>;

/// Trait for anything that can load a feed
pub trait FeedLoader: Send + Sync {
    /// Start loading and report the result to `completion`
    ///
    /// Returns immediately. `completion` is invoked at most once, on whatever
    /// thread the transport completes on.
    fn load(&self, completion: LoadCompletion);
}

/// Await-friendly access to any [`FeedLoader`]
#[async_trait]
pub trait AsyncFeedLoader {
    /// Load the feed and wait for the result
    ///
    /// Resolves to [`LoadError::Connectivity`] if the completion is dropped
    /// without ever being invoked.
    async fn load_feed(&self) -> LoadResult;
}

#[async_trait]
impl<T> AsyncFeedLoader for T
where
    T: FeedLoader + ?Sized,
{
    async fn load_feed(&self) -> LoadResult {
        let (tx, rx) = oneshot::channel();
        self.load(Box::new(move |result| {
            // Receiver only goes away if the awaiting future was dropped
            let _ = tx.send(result);
        }));
        rx.await.unwrap_or(Err(LoadError::Connectivity))
    }
}

/// Loads a feed of images from a fixed URL through an [`HttpClient`]
pub struct RemoteFeedLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
    /// Pending completions hold a `Weak` to this; it dies with the loader
    alive: Arc<()>,
}

impl RemoteFeedLoader {
    /// Create a loader for `url` that issues requests through `client`
    ///
    /// No request is made until [`FeedLoader::load`] is called.
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url,
            client,
            alive: Arc::new(()),
        }
    }

    /// Create a loader backed by [`ReqwestHttpClient`]
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot
    /// be created
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = ReqwestHttpClient::new(&config.http)?;
        Ok(Self::new(config.feed_url.clone(), Arc::new(client)))
    }

    /// The feed URL this loader requests
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn map(result: HttpClientResult) -> LoadResult {
        match result {
            Ok(payload) => {
                let items = feed_items_mapper::map(&payload.data, &payload.response)?;
                Ok(feed_image::to_models(items))
            }
            Err(e) => {
                warn!("Feed request failed: {}", e);
                Err(LoadError::from(e))
            }
        }
    }
}

impl FeedLoader for RemoteFeedLoader {
    fn load(&self, completion: LoadCompletion) {
        debug!("Loading feed from {}", self.url);

        let alive: Weak<()> = Arc::downgrade(&self.alive);
        let url = self.url.clone();

        // The transport owns this closure and calls it once; `completion` is
        // moved in, so delivery can happen at most once without a lock.
        self.client.get(
            &self.url,
            Box::new(move |result| {
                let Some(_loader) = alive.upgrade() else {
                    trace!("Feed loader for {} released, dropping result", url);
                    return;
                };
                completion(Self::map(result));
            }),
        );
    }
}

impl std::fmt::Debug for RemoteFeedLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFeedLoader")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
