//! Builder for opening prediction clients.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::auth::{AuthManager, BearerTokenAuthManager};
use crate::config::{VertexConfig, DEFAULT_API_VERSION};
use crate::error::{ClientInitError, VertexError};
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{endpoints, HttpTransport, ReqwestTransport, RequestBuilder};

use super::client::PredictionClient;

/// Builder for a [`PredictionClient`].
///
/// Nothing is validated until [`connect`](Self::connect); every failure
/// there is a `ClientInit` error and no request has been sent.
pub struct PredictionClientBuilder {
    endpoint: String,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    auth_manager: Option<Arc<dyn AuthManager>>,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl PredictionClientBuilder {
    /// Creates a builder for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_version: None,
            timeout: None,
            connect_timeout: None,
            auth_manager: None,
            transport: None,
            logger: None,
        }
    }

    /// Creates a builder carrying the settings of `config`.
    pub fn from_config(endpoint: impl Into<String>, config: &VertexConfig) -> Self {
        let mut builder = Self::new(endpoint)
            .api_version(&config.api_version)
            .auth_manager(Arc::new(BearerTokenAuthManager::from_config(config)))
            .logger(Arc::new(
                StructuredLogger::new("vertex.prediction").with_level(config.log_level),
            ));
        builder.timeout = config.timeout;
        builder.connect_timeout = config.connect_timeout;
        builder
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Sets the authentication manager.
    pub fn auth_manager(mut self, auth_manager: Arc<dyn AuthManager>) -> Self {
        self.auth_manager = Some(auth_manager);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Opens the client.
    ///
    /// # Errors
    ///
    /// Returns `ClientInit` if:
    /// - the endpoint does not parse into a base URL
    /// - no credentials are available
    /// - the HTTP transport cannot be created
    pub fn connect(self) -> Result<PredictionClient, VertexError> {
        let base_url = endpoints::base_url(&self.endpoint).map_err(|e| {
            ClientInitError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            }
        })?;

        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(ClientInitError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                message: "endpoint has no host".to_string(),
            }
            .into());
        }

        let auth_manager: Arc<dyn AuthManager> = self
            .auth_manager
            .unwrap_or_else(|| Arc::new(BearerTokenAuthManager::new(None)));
        if auth_manager.get_auth_header().is_none() {
            return Err(ClientInitError::MissingCredentials.into());
        }

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                ReqwestTransport::new(self.timeout, self.connect_timeout).map_err(|e| {
                    ClientInitError::Transport {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let logger: Arc<dyn Logger> = self
            .logger
            .unwrap_or_else(|| Arc::new(StructuredLogger::new("vertex.prediction")));

        let api_version = self
            .api_version
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let request_id = Uuid::new_v4().to_string();
        logger.debug(
            "Opening prediction client",
            json!({
                "endpoint": self.endpoint,
                "api_version": api_version,
                "request_id": request_id,
            }),
        );

        let requests = RequestBuilder::new(base_url, api_version, auth_manager);

        Ok(PredictionClient::from_parts(
            self.endpoint,
            request_id,
            requests,
            transport,
            logger,
        ))
    }
}
