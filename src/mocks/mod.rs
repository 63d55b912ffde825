//! Mock implementations for testing.
//!
//! This module provides mock implementations of transport, authentication and
//! logging components for testing the client in isolation.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::auth::AuthManager;
use crate::observability::Logger;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
///
/// Tests enqueue responses and inspect the recorded requests afterwards.
///
/// # Example
///
/// ```
/// use integrations_vertex_embeddings::mocks::MockHttpTransport;
/// use integrations_vertex_embeddings::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use std::collections::HashMap;
///
/// # #[tokio::main]
/// # async fn main() {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"predictions": []}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Post,
///     url: "https://example.com".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
///
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # }
/// ```
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Enqueue a response to be returned by the next request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        self.enqueue_json_response_with_headers(status, body, HashMap::new());
    }

    /// Enqueue a JSON response with extra headers (e.g. `retry-after`).
    pub fn enqueue_json_response_with_headers(
        &self,
        status: u16,
        body: &str,
        extra_headers: HashMap<String, String>,
    ) {
        let mut headers = extra_headers;
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            body: Bytes::from(body.to_string()),
            headers,
        }));
    }

    /// Enqueue a transport error.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// Get all requests that were made.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the last request that was made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Parse the JSON body of the request at `index`.
    pub fn request_body_json(&self, index: usize) -> Value {
        let requests = self.requests.lock().unwrap();
        let body = requests[index]
            .body
            .as_ref()
            .unwrap_or_else(|| panic!("Request {} has no body", index));
        serde_json::from_slice(body).unwrap()
    }

    /// Verify that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.requests.lock().unwrap().len();
        assert_eq!(actual, expected, "Expected {} requests, got {}", expected, actual);
    }

    /// Verify that a request was made with the expected method and URL.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {}", index);

        let request = &requests[index];
        assert_eq!(request.method, method, "Expected method {:?}, got {:?}", method, request.method);
        assert!(
            request.url.contains(url_contains),
            "Expected URL to contain '{}', got '{}'",
            url_contains,
            request.url
        );
    }

    /// Verify that a request contains a specific header.
    pub fn verify_header(&self, index: usize, header_name: &str, header_value: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {}", index);

        let request = &requests[index];
        let actual_value = request.headers.get(header_name);
        assert_eq!(
            actual_value,
            Some(&header_value.to_string()),
            "Expected header '{}' to be '{}', got {:?}",
            header_name,
            header_value,
            actual_value
        );
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection(
                    "No response configured in MockHttpTransport".to_string(),
                ))
            })
    }
}

/// Mock authentication manager for testing.
///
/// ```
/// use integrations_vertex_embeddings::mocks::MockAuthManager;
/// use integrations_vertex_embeddings::auth::AuthManager;
///
/// let auth = MockAuthManager::new("test-token");
/// assert_eq!(
///     auth.get_auth_header(),
///     Some(("Authorization".to_string(), "Bearer test-token".to_string()))
/// );
/// ```
#[derive(Clone)]
pub struct MockAuthManager {
    token: Option<String>,
}

impl MockAuthManager {
    /// Create a mock auth manager holding `token`.
    pub fn new(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    /// Create a mock auth manager with no credentials.
    pub fn without_token() -> Self {
        Self { token: None }
    }
}

impl AuthManager for MockAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        self.token
            .as_ref()
            .map(|token| ("Authorization".to_string(), format!("Bearer {}", token)))
    }
}

/// Level of a recorded log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedLevel {
    /// Recorded through `Logger::debug`.
    Debug,
    /// Recorded through `Logger::info`.
    Info,
    /// Recorded through `Logger::warn`.
    Warn,
    /// Recorded through `Logger::error`.
    Error,
}

/// Logger that records every event for later assertions.
#[derive(Default)]
pub struct MockLogger {
    events: Mutex<Vec<(RecordedLevel, String, Value)>>,
}

impl MockLogger {
    /// Create an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: RecordedLevel, message: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((level, message.to_string(), fields));
    }

    /// All recorded events in order.
    pub fn events(&self) -> Vec<(RecordedLevel, String, Value)> {
        self.events.lock().unwrap().clone()
    }

    /// Whether any event carries `message`.
    pub fn contains(&self, message: &str) -> bool {
        self.find(message).is_some()
    }

    /// Fields of the last event carrying `message`.
    pub fn find(&self, message: &str) -> Option<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(_, m, _)| m == message)
            .map(|(_, _, fields)| fields.clone())
    }

    /// Number of events carrying `message`.
    pub fn count(&self, message: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m, _)| m == message)
            .count()
    }
}

impl Logger for MockLogger {
    fn debug(&self, message: &str, fields: Value) {
        self.record(RecordedLevel::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        self.record(RecordedLevel::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.record(RecordedLevel::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.record(RecordedLevel::Error, message, fields);
    }
}
