//! [`HttpClient`] backed by reqwest
//!
//! Whatever the underlying mechanism hands back is first captured as a
//! [`RawOutcome`] and then normalized into exactly one [`HttpClientResult`].

use crate::config::HttpClientConfig;
use crate::error::{BoxError, Error, HttpClientError, Result};
use crate::http_client::{HttpClient, HttpClientResult, HttpCompletion, HttpPayload, HttpResponse};
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

/// Response object as reported by a transport mechanism
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawResponse {
    /// A recognized HTTP response
    Http(HttpResponse),
    /// A response that carries no HTTP status line
    Other {
        /// URL the response refers to
        url: Url,
    },
}

/// Unvalidated (data, response, error) triple produced by a transport mechanism
#[derive(Debug, Default)]
pub struct RawOutcome {
    /// Body bytes, if any were delivered
    pub data: Option<Vec<u8>>,
    /// Response object, if any was delivered
    pub response: Option<RawResponse>,
    /// Error, if the mechanism reported one
    pub error: Option<BoxError>,
}

impl RawOutcome {
    /// Outcome of a response that arrived without error
    pub fn response(response: RawResponse, data: Option<Vec<u8>>) -> Self {
        Self {
            data,
            response: Some(response),
            error: None,
        }
    }

    /// Outcome of a request that failed outright
    pub fn error(error: impl Into<BoxError>) -> Self {
        Self {
            data: None,
            response: None,
            error: Some(error.into()),
        }
    }
}

/// Collapse a raw triple into a single transport result
///
/// - any error wins, whatever else came with it
/// - an HTTP response without error succeeds; a missing body becomes empty bytes
/// - every other combination is [`HttpClientError::InvalidResponse`]
pub fn normalize(raw: RawOutcome) -> HttpClientResult {
    match raw {
        RawOutcome {
            error: Some(error), ..
        } => Err(HttpClientError::Transport(error)),
        RawOutcome {
            data,
            response: Some(RawResponse::Http(response)),
            error: None,
        } => Ok(HttpPayload {
            data: data.unwrap_or_default(),
            response,
        }),
        _ => Err(HttpClientError::InvalidResponse),
    }
}

/// Calls its completion exactly once, even if the owning task is dropped
///
/// A task spawned on a runtime that has shut down is dropped without being
/// polled; the completion then fires with [`HttpClientError::InvalidResponse`].
struct CompletionGuard(Option<HttpCompletion>);

impl CompletionGuard {
    fn complete(mut self, result: HttpClientResult) {
        if let Some(completion) = self.0.take() {
            completion(result);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(completion) = self.0.take() {
            warn!("Request task dropped before completing");
            completion(Err(HttpClientError::InvalidResponse));
        }
    }
}

/// HTTP client issuing feed requests through reqwest
///
/// Each `get` spawns one task on the runtime captured at construction; the
/// completion runs on that task. If that runtime has shut down, the
/// completion runs immediately with [`HttpClientError::InvalidResponse`].
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    runtime: Handle,
}

impl ReqwestHttpClient {
    /// Create a client from configuration
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid, the reqwest client
    /// cannot be built, or no tokio runtime is running
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Self::with_client(client)
    }

    /// Wrap an existing reqwest client
    ///
    /// # Errors
    /// Returns error if no tokio runtime is running
    pub fn with_client(client: reqwest::Client) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::Runtime(format!("HTTP client requires a tokio runtime: {}", e)))?;
        Ok(Self { client, runtime })
    }

    async fn fetch(client: &reqwest::Client, url: Url) -> RawOutcome {
        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return RawOutcome::error(e),
        };

        let meta = HttpResponse::new(response.url().clone(), response.status().as_u16());

        match response.bytes().await {
            Ok(body) if body.is_empty() => RawOutcome::response(RawResponse::Http(meta), None),
            Ok(body) => RawOutcome::response(RawResponse::Http(meta), Some(body.to_vec())),
            Err(e) => RawOutcome {
                data: None,
                response: Some(RawResponse::Http(meta)),
                error: Some(Box::new(e)),
            },
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        debug!("GET {}", url);

        let client = self.client.clone();
        let url = url.clone();
        let completion = CompletionGuard(Some(completion));

        self.runtime.spawn(async move {
            let result = normalize(Self::fetch(&client, url.clone()).await);
            match &result {
                Ok(payload) => debug!(
                    "GET {} completed: HTTP {} ({} bytes)",
                    url,
                    payload.response.status,
                    payload.data.len()
                ),
                Err(e) => warn!("GET {} failed: {}", url, e),
            }
            completion.complete(result);
        });
    }
}
