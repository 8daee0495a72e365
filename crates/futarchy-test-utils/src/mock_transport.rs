//! Mock implementation of the `Transport` trait for testing.
//!
//! Replays scripted responses in order and records every request it
//! receives, so tests can assert both on outcomes and on which calls were
//! (or were not) made.

use async_trait::async_trait;
use futarchy_x402::{HttpRequest, HttpResponse, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

enum Scripted {
    Response(HttpResponse),
    Failure(String),
}

struct MockTransportInner {
    /// Responses still to be replayed, in order.
    script: VecDeque<Scripted>,
    /// Record of every request sent.
    requests: Vec<HttpRequest>,
}

/// A mock implementation of the `Transport` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and all
/// clones share the same script and request log. A request arriving after
/// the script is exhausted fails with a network error.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<RwLock<MockTransportInner>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockTransportInner {
                script: VecDeque::new(),
                requests: Vec::new(),
            })),
        }
    }

    /// Queue a response.
    pub fn respond(self, response: HttpResponse) -> Self {
        self.push(Scripted::Response(response));
        self
    }

    /// Queue a response with a status and body.
    pub fn respond_with(self, status: u16, body: impl Into<String>) -> Self {
        self.respond(HttpResponse::new(status, body))
    }

    /// Queue a network failure.
    pub fn fail_with(self, cause: impl Into<String>) -> Self {
        self.push(Scripted::Failure(cause.into()));
        self
    }

    /// Queue a response at runtime.
    pub fn push_response(&self, response: HttpResponse) {
        self.push(Scripted::Response(response));
    }

    fn push(&self, entry: Scripted) {
        self.inner.write().unwrap().script.push_back(entry);
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Get all requests sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.read().unwrap().requests.clone()
    }

    /// Get the number of requests sent.
    pub fn request_count(&self) -> usize {
        self.inner.read().unwrap().requests.len()
    }

    /// Get requests whose URL contains `fragment`.
    pub fn requests_to(&self, fragment: &str) -> Vec<HttpRequest> {
        self.inner
            .read()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }

    /// Get the number of scripted entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inner.read().unwrap().script.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.write().unwrap();
        inner.requests.push(request);
        match inner.script.pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Failure(cause)) => Err(TransportError::Network(cause)),
            None => Err(TransportError::Network("no scripted response".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let mock = MockTransport::new()
            .respond_with(402, "")
            .fail_with("reset");

        let first = mock.send(HttpRequest::get("https://a/1")).await.unwrap();
        assert_eq!(first.status, 402);

        let second = mock.send(HttpRequest::get("https://a/2")).await;
        assert_eq!(second, Err(TransportError::Network("reset".to_string())));

        assert!(mock.send(HttpRequest::get("https://a/3")).await.is_err());
        assert_eq!(mock.request_count(), 3);
        assert_eq!(mock.requests_to("/2").len(), 1);
    }
}
