//! HTTP request builder for the Vertex AI API.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::auth::AuthManager;
use crate::error::{ClientInitError, VertexError};
use super::http::{HttpRequest, HttpMethod};

/// Builder for constructing HTTP requests against one service endpoint.
///
/// The `RequestBuilder` handles:
/// - URL construction under the API version prefix
/// - Authentication headers from the auth manager
/// - Request body serialization
#[derive(Clone)]
pub struct RequestBuilder {
    /// Base URL of the regional endpoint.
    base_url: Url,
    /// API version (e.g., "v1").
    api_version: String,
    /// Authentication manager.
    auth_manager: Arc<dyn AuthManager>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(base_url: Url, api_version: String, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds a complete URL below the API version prefix.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// a segment stay part of that segment.
    pub fn build_url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, VertexError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientInitError::InvalidEndpoint {
                endpoint: self.base_url.to_string(),
                message: "endpoint cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(&self.api_version)
            .extend(segments);
        Ok(url)
    }

    /// Builds an HTTP request.
    ///
    /// Adds `Content-Type` when there is a body, plus the authorization and
    /// quota-project headers from the auth manager.
    pub fn build_request<S: AsRef<str>, T: Serialize>(
        &self,
        method: HttpMethod,
        segments: &[S],
        body: Option<&T>,
    ) -> Result<HttpRequest, VertexError> {
        let url = self.build_url(segments)?;

        let mut headers = HashMap::new();

        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        if let Some((key, value)) = self.auth_manager.get_auth_header() {
            headers.insert(key, value);
        }
        headers.extend(self.auth_manager.extra_headers());

        let body_bytes = match body {
            Some(body) => {
                let json = serde_json::to_vec(body).map_err(|e| VertexError::PayloadEncoding {
                    message: e.to_string(),
                })?;
                Some(Bytes::from(json))
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body: body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BearerTokenAuthManager;
    use secrecy::SecretString;
    use serde_json::json;

    fn create_test_builder() -> RequestBuilder {
        let auth = BearerTokenAuthManager::new(Some(SecretString::new("test-token".into())))
            .with_quota_project("quota");
        RequestBuilder::new(
            Url::parse("https://us-central1-aiplatform.googleapis.com").unwrap(),
            "v1".to_string(),
            Arc::new(auth),
        )
    }

    #[test]
    fn test_build_url_with_version() {
        let builder = create_test_builder();
        let url = builder
            .build_url(&[
                "projects", "p1", "locations", "us-central1", "publishers", "google", "models",
                "m:predict",
            ])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/p1/locations/us-central1/publishers/google/models/m:predict"
        );
    }

    #[test]
    fn test_build_url_encodes_each_segment() {
        let builder = create_test_builder();
        let url = builder
            .build_url(&["projects", "a/b", "models", "m#frag?x=1:predict"])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/a%2Fb/models/m%23frag%3Fx=1:predict"
        );
        assert_eq!(url.host_str(), Some("us-central1-aiplatform.googleapis.com"));
        assert!(url.fragment().is_none());
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let auth = BearerTokenAuthManager::new(Some(SecretString::new("t".into())));
        let builder = RequestBuilder::new(
            Url::parse("http://127.0.0.1:9000/proxy/").unwrap(),
            "v1".to_string(),
            Arc::new(auth),
        );

        assert_eq!(
            builder.build_url(&["projects", "p"]).unwrap().as_str(),
            "http://127.0.0.1:9000/proxy/v1/projects/p"
        );
    }

    #[test]
    fn test_build_url_rejects_cannot_be_a_base() {
        let auth = BearerTokenAuthManager::new(Some(SecretString::new("t".into())));
        let builder = RequestBuilder::new(
            Url::parse("mailto:someone@example.com").unwrap(),
            "v1".to_string(),
            Arc::new(auth),
        );

        assert!(matches!(
            builder.build_url(&["projects", "p"]),
            Err(VertexError::ClientInit(ClientInitError::InvalidEndpoint { .. }))
        ));
    }

    #[test]
    fn test_build_request_with_body() {
        let builder = create_test_builder();
        let body = json!({"instances": [{"content": "hi"}]});

        let request = builder
            .build_request(HttpMethod::Post, &["projects", "p:predict"], Some(&body))
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(request.headers.get("Authorization").unwrap(), "Bearer test-token");
        assert_eq!(request.headers.get("x-goog-user-project").unwrap(), "quota");

        let sent: serde_json::Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn test_build_request_without_body() {
        let builder = create_test_builder();
        let request = builder
            .build_request::<_, serde_json::Value>(HttpMethod::Get, &["projects", "p"], None)
            .unwrap();

        assert!(!request.headers.contains_key("Content-Type"));
        assert!(request.body.is_none());
    }
}
