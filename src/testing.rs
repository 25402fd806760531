//! Test doubles for [`HttpClient`]
//!
//! - [`HttpClientSpy`] records requests and lets the test decide when and how
//!   each one completes.
//! - [`HttpClientStub`] completes every request immediately with a canned
//!   [`RawOutcome`] run through the same normalization as the real client.
//!
//! Available to this crate's tests and, with the `test-util` feature, to
//! downstream crates.

use crate::error::HttpClientError;
use crate::http_client::{HttpClient, HttpCompletion, HttpPayload, HttpResponse};
use crate::reqwest_client::{RawOutcome, normalize};
use std::sync::Mutex;
use url::Url;

type Message = (Url, Option<HttpCompletion>);

/// Records every `get` and holds its completion until the test fires it
#[derive(Default)]
pub struct HttpClientSpy {
    messages: Mutex<Vec<Message>>,
}

impl HttpClientSpy {
    /// Create a spy with no recorded requests
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs of every request issued so far, in call order
    pub fn requested_urls(&self) -> Vec<Url> {
        self.lock().iter().map(|(url, _)| url.clone()).collect()
    }

    /// Complete request `index` with a transport error
    ///
    /// # Panics
    /// Panics if no request `index` exists or it was already completed
    pub fn complete_with_error(&self, error: HttpClientError, index: usize) {
        let (_, completion) = self.take(index);
        completion(Err(error));
    }

    /// Complete request `index` with an HTTP response from its own URL
    ///
    /// # Panics
    /// Panics if no request `index` exists or it was already completed
    pub fn complete_with_status(&self, status: u16, data: &[u8], index: usize) {
        let (url, completion) = self.take(index);
        completion(Ok(HttpPayload {
            data: data.to_vec(),
            response: HttpResponse::new(url, status),
        }));
    }

    // The lock is released before the completion runs, so completions may
    // call back into the spy.
    fn take(&self, index: usize) -> (Url, HttpCompletion) {
        let mut messages = self.lock();
        let Some((url, slot)) = messages.get_mut(index) else {
            panic!("no request at index {index}");
        };
        let Some(completion) = slot.take() else {
            panic!("request at index {index} already completed");
        };
        (url.clone(), completion)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl HttpClient for HttpClientSpy {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        self.lock().push((url.clone(), Some(completion)));
    }
}

type RequestObserver = Box<dyn FnOnce(&Url) + Send>;

/// Completes requests immediately with a canned, single-use outcome
///
/// Each canned outcome and each observer is consumed by exactly one `get`.
/// Without a canned outcome a request completes with an empty
/// [`RawOutcome`], which normalizes to [`HttpClientError::InvalidResponse`].
#[derive(Default)]
pub struct HttpClientStub {
    outcome: Mutex<Option<RawOutcome>>,
    observer: Mutex<Option<RequestObserver>>,
}

impl HttpClientStub {
    /// Create a stub with nothing canned
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `outcome` for the next request
    pub fn set_outcome(&self, outcome: RawOutcome) {
        *self
            .outcome
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(outcome);
    }

    /// Call `observer` with the URL of the next request
    pub fn observe_requests(&self, observer: impl FnOnce(&Url) + Send + 'static) {
        *self
            .observer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(Box::new(observer));
    }
}

impl HttpClient for HttpClientStub {
    fn get(&self, url: &Url, completion: HttpCompletion) {
        let observer = self
            .observer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(observer) = observer {
            observer(url);
        }

        let outcome = self
            .outcome
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
            .unwrap_or_default();
        completion(normalize(outcome));
    }
}
