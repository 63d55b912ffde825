//! Scoped prediction client.

use serde_json::json;
use std::sync::Arc;

use crate::error::{RemoteCallError, VertexError};
use crate::observability::Logger;
use crate::transport::{endpoints, HttpMethod, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{PredictRequest, PredictResponse};

use super::builder::PredictionClientBuilder;

/// Connection to one regional prediction endpoint.
///
/// A client is opened per call and released when it goes out of scope, on
/// success and error paths alike. With the default transport the client owns
/// its own connection pool, which is closed on release.
///
/// # Example
///
/// ```no_run
/// use integrations_vertex_embeddings::client::PredictionClient;
/// use integrations_vertex_embeddings::auth::BearerTokenAuthManager;
/// use integrations_vertex_embeddings::types::PredictRequest;
/// use secrecy::SecretString;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = SecretString::new("ya29.token".into());
/// let client = PredictionClient::builder("us-central1-aiplatform.googleapis.com:443")
///     .auth_manager(Arc::new(BearerTokenAuthManager::new(Some(token))))
///     .connect()?;
///
/// let response = client
///     .predict(&PredictRequest {
///         endpoint: "projects/p1/locations/us-central1/publishers/google/models/textembedding-gecko".into(),
///         instances: vec![json!({"content": "What is life?"})],
///     })
///     .await?;
/// client.close();
/// # Ok(())
/// # }
/// ```
pub struct PredictionClient {
    endpoint: String,
    request_id: String,
    requests: RequestBuilder,
    transport: Arc<dyn HttpTransport>,
    logger: Arc<dyn Logger>,
}

impl PredictionClient {
    /// Creates a builder for the given `host:port` or URL endpoint.
    pub fn builder(endpoint: impl Into<String>) -> PredictionClientBuilder {
        PredictionClientBuilder::new(endpoint)
    }

    pub(super) fn from_parts(
        endpoint: String,
        request_id: String,
        requests: RequestBuilder,
        transport: Arc<dyn HttpTransport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        logger.debug(
            "Prediction client opened",
            json!({
                "endpoint": endpoint,
                "base_url": requests.base_url().as_str(),
                "request_id": request_id,
            }),
        );

        Self {
            endpoint,
            request_id,
            requests,
            transport,
            logger,
        }
    }

    /// The endpoint this client is connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Correlation id attached to this client's log events.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Issues a single predict call.
    ///
    /// # Errors
    ///
    /// - `PayloadEncoding` if the request body cannot be serialized
    /// - `RemoteCall` on transport failure, non-2xx status or undecodable body
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, VertexError> {
        let segments = endpoints::predict(&request.endpoint);
        let http_request =
            self.requests
                .build_request(HttpMethod::Post, segments.as_slice(), Some(request))?;

        self.logger.debug(
            "Sending predict request",
            json!({
                "url": http_request.url,
                "instances": request.instances.len(),
                "request_id": self.request_id,
            }),
        );

        let response = self
            .transport
            .send(http_request)
            .await
            .map_err(RemoteCallError::from)?;

        let status = response.status;
        let parsed: PredictResponse = ResponseParser::parse_response(response)?;

        self.logger.debug(
            "Predict response received",
            json!({
                "status": status,
                "predictions": parsed.predictions.len(),
                "deployed_model_id": parsed.deployed_model_id,
                "request_id": self.request_id,
            }),
        );

        Ok(parsed)
    }

    /// Releases the client. Dropping it has the same effect.
    pub fn close(self) {}
}

impl Drop for PredictionClient {
    fn drop(&mut self) {
        self.logger.debug(
            "Prediction client released",
            json!({
                "endpoint": self.endpoint,
                "request_id": self.request_id,
            }),
        );
    }
}

impl std::fmt::Debug for PredictionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionClient")
            .field("endpoint", &self.endpoint)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
