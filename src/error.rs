//! Error types for feed-loader
//!
//! Three layers of errors live here:
//! - [`LoadError`] is the whole taxonomy a feed consumer ever sees
//! - [`HttpClientError`] describes a failed transport outcome
//! - [`Error`] covers constructing loaders and clients from configuration

use thiserror::Error;

/// Result type alias for feed-loader construction and configuration
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error carried by a failed transport outcome
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for feed-loader
///
/// Only returned while building clients and loaders. Loading a feed never
/// produces this type; see [`LoadError`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "http.timeout")
        key: Option<String>,
    },

    /// The underlying HTTP client could not be built
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No async runtime available to drive requests
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Failure delivered by a feed load
///
/// Transport details are collapsed on purpose: callers only learn whether the
/// server could be reached and whether what came back was usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum LoadError {
    /// The transport failed to produce an HTTP response
    #[error("connectivity error")]
    Connectivity,

    /// A response arrived but its status or payload was rejected
    #[error("invalid data")]
    InvalidData,
}

/// Failed transport outcome
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The underlying mechanism reported an error (DNS, timeout, TLS, reset...)
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Neither a usable HTTP response nor an error was produced
    #[error("invalid response: no HTTP response and no error")]
    InvalidResponse,
}

impl From<HttpClientError> for LoadError {
    fn from(_: HttpClientError) -> Self {
        LoadError::Connectivity
    }
}
