//! Configuration types for feed-loader

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// HTTP transport configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// User-Agent header sent with every request (default: "feed-loader/<version>")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Check that the settings can drive a client
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a zero timeout or an empty user agent
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be non-zero", "http.timeout"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::config(
                "user agent must not be empty",
                "http.user_agent",
            ));
        }
        Ok(())
    }
}

/// Main configuration for a remote feed loader
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Absolute http(s) URL of the feed
    pub feed_url: Url,

    /// Transport settings
    #[serde(default)]
    pub http: HttpClientConfig,
}

impl Config {
    /// Create a configuration for `feed_url` with default transport settings
    pub fn new(feed_url: Url) -> Self {
        Self {
            feed_url,
            http: HttpClientConfig::default(),
        }
    }

    /// Check the whole configuration
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the feed URL is not http(s) or the
    /// transport settings are invalid
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.feed_url.scheme(), "http" | "https") {
            return Err(Error::config(
                format!("unsupported feed URL scheme: {}", self.feed_url.scheme()),
                "feed_url",
            ));
        }
        self.http.validate()
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("feed-loader/{}", env!("CARGO_PKG_VERSION"))
}
