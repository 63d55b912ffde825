//! HTTP response parser for the Vertex AI API.
//!
//! This module provides the `ResponseParser` for parsing HTTP responses,
//! handling errors, and extracting metadata like retry-after headers.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{map_http_status_with_body, RemoteCallError};
use super::http::HttpResponse;

/// Parser for HTTP responses from the Vertex AI API.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a successful HTTP response into the expected type.
    ///
    /// Non-2xx responses become the mapped [`RemoteCallError`].
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_vertex_embeddings::transport::{ResponseParser, HttpResponse};
    /// use integrations_vertex_embeddings::types::PredictResponse;
    /// use bytes::Bytes;
    /// use std::collections::HashMap;
    ///
    /// let response = HttpResponse {
    ///     status: 200,
    ///     headers: HashMap::new(),
    ///     body: Bytes::from(r#"{"predictions":[{"embeddings":{"values":[0.1]}}]}"#),
    /// };
    ///
    /// let parsed: PredictResponse = ResponseParser::parse_response(response).unwrap();
    /// assert_eq!(parsed.predictions.len(), 1);
    /// ```
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, RemoteCallError> {
        if (200..300).contains(&response.status) {
            serde_json::from_slice(&response.body).map_err(|e| RemoteCallError::Deserialization {
                message: e.to_string(),
            })
        } else {
            Err(Self::parse_error_response(&response))
        }
    }

    /// Maps an error response, filling in `Retry-After` where it applies.
    pub fn parse_error_response(response: &HttpResponse) -> RemoteCallError {
        let mut error = map_http_status_with_body(response.status, &response.body);
        error.set_retry_after(Self::parse_retry_after(&response.headers));

        if let Some(id) = Self::extract_request_id(&response.headers) {
            tracing::debug!(
                request_id = %id,
                status = response.status,
                error = ?error,
                "API error occurred"
            );
        }

        error
    }

    /// Parses the Retry-After header (delay in seconds).
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_vertex_embeddings::transport::ResponseParser;
    /// use std::collections::HashMap;
    /// use std::time::Duration;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("retry-after".to_string(), "60".to_string());
    ///
    /// assert_eq!(ResponseParser::parse_retry_after(&headers), Some(Duration::from_secs(60)));
    /// ```
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts the request ID from response headers for debugging.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        let possible_headers = ["x-request-id", "x-goog-request-id", "request-id"];

        headers
            .iter()
            .find(|(key, _)| {
                possible_headers
                    .iter()
                    .any(|candidate| key.eq_ignore_ascii_case(candidate))
            })
            .map(|(_, value)| value.clone())
    }
}
