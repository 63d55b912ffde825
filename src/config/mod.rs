//! Configuration types for the Vertex embeddings client.

use secrecy::SecretString;
use std::time::Duration;
use crate::error::{ConfigurationError, VertexError};

/// Default service domain; the regional host is `{location}-{domain}`.
pub const DEFAULT_SERVICE_DOMAIN: &str = "aiplatform.googleapis.com";

/// Default TLS port of the prediction service.
pub const DEFAULT_PORT: u16 = 443;

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default model publisher.
pub const DEFAULT_PUBLISHER: &str = "google";

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

/// Configuration for the Vertex embeddings client.
///
/// Holds everything that is not part of an individual call: credentials,
/// endpoint shape and transport limits. The per-call coordinates live in
/// [`PredictionTarget`](crate::types::PredictionTarget).
#[derive(Clone)]
pub struct VertexConfig {
    /// OAuth2 access token sent as a bearer token.
    pub access_token: Option<SecretString>,
    /// Project billed for the call (`x-goog-user-project`).
    pub quota_project: Option<String>,
    /// Service domain appended to the location.
    pub service_domain: String,
    /// Service port.
    pub port: u16,
    /// Explicit endpoint, replacing the one derived from the location.
    pub api_endpoint: Option<String>,
    /// API version path prefix.
    pub api_version: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Connect timeout. `None` keeps the transport default.
    pub connect_timeout: Option<Duration>,
    /// Log level.
    pub log_level: LogLevel,
}

impl VertexConfig {
    /// Create a new configuration builder.
    pub fn builder() -> VertexConfigBuilder {
        VertexConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `VERTEX_ACCESS_TOKEN` or `GOOGLE_OAUTH_ACCESS_TOKEN`
    /// - `VERTEX_QUOTA_PROJECT`
    /// - `VERTEX_SERVICE_DOMAIN`
    /// - `VERTEX_API_ENDPOINT`
    /// - `VERTEX_API_VERSION`
    /// - `VERTEX_TIMEOUT_SECS`
    /// - `VERTEX_CONNECT_TIMEOUT_SECS`
    ///
    /// All of them are optional. A missing token is reported when the
    /// prediction client is opened, not here.
    pub fn from_env() -> Result<Self, VertexError> {
        let mut builder = Self::builder();

        if let Some(token) = std::env::var("VERTEX_ACCESS_TOKEN")
            .or_else(|_| std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN"))
            .ok()
            .filter(|t| !t.is_empty())
        {
            builder = builder.access_token(SecretString::new(token));
        }

        if let Ok(project) = std::env::var("VERTEX_QUOTA_PROJECT") {
            builder = builder.quota_project(&project);
        }

        if let Ok(domain) = std::env::var("VERTEX_SERVICE_DOMAIN") {
            builder = builder.service_domain(&domain);
        }

        if let Ok(endpoint) = std::env::var("VERTEX_API_ENDPOINT") {
            builder = builder.api_endpoint(&endpoint);
        }

        if let Ok(version) = std::env::var("VERTEX_API_VERSION") {
            builder = builder.api_version(&version);
        }

        if let Some(secs) = env_secs("VERTEX_TIMEOUT_SECS") {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(secs) = env_secs("VERTEX_CONNECT_TIMEOUT_SECS") {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

fn env_secs(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

impl std::fmt::Debug for VertexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("quota_project", &self.quota_project)
            .field("service_domain", &self.service_domain)
            .field("port", &self.port)
            .field("api_endpoint", &self.api_endpoint)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Builder for VertexConfig.
#[derive(Default)]
pub struct VertexConfigBuilder {
    access_token: Option<SecretString>,
    quota_project: Option<String>,
    service_domain: Option<String>,
    port: Option<u16>,
    api_endpoint: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
}

impl VertexConfigBuilder {
    /// Set the access token.
    pub fn access_token(mut self, token: SecretString) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Set the quota project.
    pub fn quota_project(mut self, project: &str) -> Self {
        self.quota_project = Some(project.to_string());
        self
    }

    /// Set the service domain.
    pub fn service_domain(mut self, domain: &str) -> Self {
        self.service_domain = Some(domain.to_string());
        self
    }

    /// Set the service port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Override the endpoint, e.g. `"europe-west4-aiplatform.googleapis.com:443"`
    /// or `"http://127.0.0.1:8080"`.
    pub fn api_endpoint(mut self, endpoint: &str) -> Self {
        self.api_endpoint = Some(endpoint.to_string());
        self
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<VertexConfig, VertexError> {
        let service_domain = self
            .service_domain
            .unwrap_or_else(|| DEFAULT_SERVICE_DOMAIN.to_string());
        if service_domain.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "service domain must not be empty".to_string(),
            }
            .into());
        }

        let api_version = self
            .api_version
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        if api_version.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "API version must not be empty".to_string(),
            }
            .into());
        }

        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "port must be non-zero".to_string(),
            }
            .into());
        }

        if let Some(endpoint) = self.api_endpoint.as_deref() {
            if endpoint.trim().is_empty() {
                return Err(ConfigurationError::InvalidEndpoint {
                    endpoint: endpoint.to_string(),
                }
                .into());
            }
        }

        Ok(VertexConfig {
            access_token: self.access_token,
            quota_project: self.quota_project,
            service_domain,
            port,
            api_endpoint: self.api_endpoint,
            api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            log_level: self.log_level.unwrap_or_default(),
        })
    }
}
