//! Transport capability used by feed loaders
//!
//! An [`HttpClient`] performs a single GET per call and reports the outcome
//! through a one-shot completion. Implementations decide on which thread or
//! task the completion runs; callers must not assume either.

use crate::error::HttpClientError;
use url::Url;

/// Status metadata of an HTTP response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// URL the response was served from
    pub url: Url,
    /// HTTP status code
    pub status: u16,
}

impl HttpResponse {
    /// Create response metadata for the given URL and status code
    pub fn new(url: Url, status: u16) -> Self {
        Self { url, status }
    }
}

/// Body and status metadata of a successful transport outcome
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpPayload {
    /// Response body; empty when the server sent none
    pub data: Vec<u8>,
    /// Status metadata
    pub response: HttpResponse,
}

/// Outcome of a single [`HttpClient::get`] call
pub type HttpClientResult = std::result::Result<HttpPayload, HttpClientError>;

/// One-shot completion handed to [`HttpClient::get`]
pub type HttpCompletion = Box<dyn FnOnce(HttpClientResult) + Send + 'static>;

/// Trait for issuing feed requests
///
/// Implementations must invoke `completion` exactly once per call, either with
/// the response body and status or with a transport error. No retries are
/// performed at this layer.
///
/// # Examples
///
/// ```
/// use feed_loader::http_client::{HttpClient, HttpCompletion, HttpPayload, HttpResponse};
/// use url::Url;
///
/// struct AlwaysEmpty;
///
/// impl HttpClient for AlwaysEmpty {
///     fn get(&self, url: &Url, completion: HttpCompletion) {
///         completion(Ok(HttpPayload {
///             data: br#"{"items":[]}"#.to_vec(),
///             response: HttpResponse::new(url.clone(), 200),
///         }));
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Issue one GET request for `url` and report its outcome to `completion`
    fn get(&self, url: &Url, completion: HttpCompletion);
}
