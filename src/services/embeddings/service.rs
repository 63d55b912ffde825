//! Embeddings requester implementation.

use async_trait::async_trait;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

use super::report::write_outcome;
use super::EmbeddingsService;
use crate::auth::{AuthManager, BearerTokenAuthManager};
use crate::client::{PredictionClient, PredictionClientBuilder};
use crate::config::VertexConfig;
use crate::error::VertexError;
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{endpoints, HttpTransport};
use crate::types::{PredictRequest, Prediction, PredictionTarget, PromptPayload};

/// Requests text embeddings from Vertex AI publisher models.
///
/// Every call opens its own [`PredictionClient`] against the regional endpoint
/// of the target's location and releases it before returning. The requester
/// holds no per-call state and can be shared between tasks.
///
/// # Example
///
/// ```no_run
/// use integrations_vertex_embeddings::config::VertexConfig;
/// use integrations_vertex_embeddings::services::{EmbeddingRequester, EmbeddingsService};
/// use integrations_vertex_embeddings::types::PredictionTarget;
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = VertexConfig::builder()
///     .access_token(SecretString::new("ya29.token".into()))
///     .build()?;
/// let requester = EmbeddingRequester::new(config);
///
/// let target = PredictionTarget::new("p1", "us-central1", "google", "textembedding-gecko");
/// let prediction = requester.generate_embeddings("What is life?", &target).await?;
/// println!("{}", prediction);
/// # Ok(())
/// # }
/// ```
pub struct EmbeddingRequester {
    config: Arc<VertexConfig>,
    auth_manager: Arc<dyn AuthManager>,
    logger: Arc<dyn Logger>,

    // Shared with every client opened by this requester when set
    transport: Option<Arc<dyn HttpTransport>>,
}

impl EmbeddingRequester {
    /// Creates a requester from a validated configuration.
    pub fn new(config: VertexConfig) -> Self {
        let auth_manager = Arc::new(BearerTokenAuthManager::from_config(&config));
        let logger = Arc::new(StructuredLogger::new("vertex.embeddings").with_level(config.log_level));

        Self {
            config: Arc::new(config),
            auth_manager,
            logger,
            transport: None,
        }
    }

    /// Creates a requester from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if an environment variable holds an invalid value.
    pub fn from_env() -> Result<Self, VertexError> {
        VertexConfig::from_env().map(Self::new)
    }

    /// Uses `transport` for every client instead of a fresh HTTP client per call.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the authentication manager derived from the configuration.
    pub fn with_auth_manager(mut self, auth_manager: Arc<dyn AuthManager>) -> Self {
        self.auth_manager = auth_manager;
        self
    }

    /// Sets a custom logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// The configuration this requester was built with.
    pub fn config(&self) -> &VertexConfig {
        &self.config
    }

    /// Endpoint serving `location`, unless an explicit override is configured.
    ///
    /// # Errors
    ///
    /// Returns `ClientInit` when `location` is not a valid region name.
    pub fn endpoint_for(&self, location: &str) -> Result<String, VertexError> {
        match &self.config.api_endpoint {
            Some(endpoint) => Ok(endpoint.clone()),
            None => endpoints::regional_endpoint(
                location,
                &self.config.service_domain,
                self.config.port,
            )
            .map_err(VertexError::from),
        }
    }

    fn open_client(&self, endpoint: &str) -> Result<PredictionClient, VertexError> {
        let mut builder = PredictionClientBuilder::from_config(endpoint, &self.config)
            .auth_manager(Arc::clone(&self.auth_manager))
            .logger(Arc::clone(&self.logger));

        if let Some(transport) = &self.transport {
            builder = builder.transport(Arc::clone(transport));
        }

        builder.connect()
    }

    async fn request_prediction(
        &self,
        prompt: &str,
        target: &PredictionTarget,
    ) -> Result<Prediction, VertexError> {
        let endpoint = self.endpoint_for(&target.location)?;
        let client = self.open_client(&endpoint)?;

        let resource_path = target.resource_path();
        let instance = PromptPayload::new(prompt)
            .to_value()
            .map_err(|e| VertexError::PayloadEncoding {
                message: e.to_string(),
            })?;

        let request = PredictRequest {
            endpoint: resource_path,
            instances: vec![instance],
        };

        let response = client.predict(&request).await?;

        response
            .predictions
            .into_iter()
            .next()
            .ok_or(VertexError::EmptyResult {
                endpoint: request.endpoint,
            })
    }

    /// Generates embeddings and writes a status line describing the outcome
    /// to `w`.
    ///
    /// The error of a failed call is returned unchanged after its line has
    /// been written.
    ///
    /// # Errors
    ///
    /// Returns the error of the call, or `Output` if the success line cannot
    /// be written.
    pub async fn write_embeddings<W: Write + ?Sized>(
        &self,
        w: &mut W,
        prompt: &str,
        project: &str,
        location: &str,
        publisher: &str,
        model: &str,
    ) -> Result<(), VertexError> {
        let target = PredictionTarget::new(project, location, publisher, model);
        let outcome = self.generate_embeddings(prompt, &target).await;
        let written = write_outcome(w, &outcome);

        match (outcome, written) {
            (Ok(_), Ok(())) => Ok(()),
            (Ok(_), Err(e)) => Err(VertexError::Output {
                message: e.to_string(),
            }),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(e)) => {
                self.logger.warn(
                    "Failed to write error report",
                    json!({ "error": err.to_string(), "io_error": e.to_string() }),
                );
                Err(err)
            }
        }
    }
}

#[async_trait]
impl EmbeddingsService for EmbeddingRequester {
    async fn generate_embeddings(
        &self,
        prompt: &str,
        target: &PredictionTarget,
    ) -> Result<Prediction, VertexError> {
        self.logger.debug(
            "Generating embeddings",
            json!({
                "project": target.project,
                "location": target.location,
                "publisher": target.publisher,
                "model": target.model,
                "prompt_chars": prompt.chars().count(),
            }),
        );

        let result = self.request_prediction(prompt, target).await;

        match &result {
            Ok(_) => self.logger.info(
                "Embeddings generated",
                json!({ "model": target.resource_path() }),
            ),
            Err(err) => self.logger.error(
                "Embeddings request failed",
                json!({
                    "model": target.resource_path(),
                    "error": err.to_string(),
                    "retryable": err.is_retryable(),
                }),
            ),
        }

        result
    }
}

impl std::fmt::Debug for EmbeddingRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingRequester")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

/// Generates embeddings for `prompt` with the given publisher model and
/// writes a status line to `w`.
///
/// Credentials and endpoint overrides come from the environment (see
/// [`VertexConfig::from_env`]).
///
/// # Errors
///
/// Returns the failure of whichever step failed, unchanged.
pub async fn generate_embeddings<W: Write + ?Sized>(
    w: &mut W,
    prompt: &str,
    project: &str,
    location: &str,
    publisher: &str,
    model: &str,
) -> Result<(), VertexError> {
    let requester = match EmbeddingRequester::from_env() {
        Ok(requester) => requester,
        Err(err) => {
            let outcome = Err(err);
            // Nothing more can be reported when the sink itself fails here.
            let _ = write_outcome(w, &outcome);
            return outcome.map(|_| ());
        }
    };

    requester
        .write_embeddings(w, prompt, project, location, publisher, model)
        .await
}
