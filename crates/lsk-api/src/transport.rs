//! Transport layer

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::error::TransportError;
use crate::request::RequestDescriptor;

/// Sends a built request to its peer (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the decoded JSON payload
    ///
    /// A peer answering `success: false` is still `Ok`; `Err` means the
    /// request could not be completed.
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError>;
}

type MockResponse = Result<Value, TransportError>;

/// Mock transport for testing
///
/// Answers, in order of precedence: a sticky response set for the request's
/// peer, the next scripted response, `{"success": true}`. Clones share state,
/// so a test can keep a handle after moving one into a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    peer_responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<RequestDescriptor>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a payload
    pub fn push_response(&self, response: Value) {
        self.script.lock().push_back(Ok(response));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.script.lock().push_back(Err(error));
    }

    /// Always answer requests to `peer` with `response`
    pub fn set_peer_response(&self, peer: &str, response: Value) {
        self.peer_responses
            .lock()
            .insert(peer.to_string(), Ok(response));
    }

    /// Always fail requests to `peer`
    pub fn set_peer_error(&self, peer: &str, error: TransportError) {
        self.peer_responses
            .lock()
            .insert(peer.to_string(), Err(error));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Clear scripted and sticky responses
    pub fn clear_responses(&self) {
        self.script.lock().clear();
        self.peer_responses.lock().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        self.requests.lock().push(request.clone());

        let host = url::Url::parse(&request.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));
        if let Some(host) = host {
            if let Some(response) = self.peer_responses.lock().get(&host) {
                return response.clone();
            }
        }

        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "success": true })))
    }
}

/// HTTP transport for real peers
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create an HTTP transport with a per-request timeout
    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        use crate::request::Verb;

        let method = match request.verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.verb.is_get() {
            builder = builder.json(&request.body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        // peers report `success: false` with 4xx codes, so the body wins over the status
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(TransportError::Decode(e.to_string())),
        }
    }
}
