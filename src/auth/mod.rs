//! Authentication for the Vertex AI prediction API.
//!
//! Vertex AI accepts OAuth2 access tokens only. Obtaining and refreshing
//! the token (for example with `gcloud auth print-access-token`) is left to
//! the caller; this module only attaches it to requests.

use crate::config::VertexConfig;
use secrecy::{ExposeSecret, SecretString};

/// Header used to bill a call to a project other than the token's.
pub const QUOTA_PROJECT_HEADER: &str = "x-goog-user-project";

/// Authentication manager for the prediction API.
pub trait AuthManager: Send + Sync {
    /// Get the authorization header name and value, or `None` when no
    /// credentials are available.
    fn get_auth_header(&self) -> Option<(String, String)>;

    /// Extra headers that accompany the credentials.
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Static bearer-token authentication manager.
pub struct BearerTokenAuthManager {
    token: Option<SecretString>,
    quota_project: Option<String>,
}

impl BearerTokenAuthManager {
    /// Create a new bearer token auth manager.
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            token,
            quota_project: None,
        }
    }

    /// Bill calls to the given project.
    pub fn with_quota_project(mut self, project: impl Into<String>) -> Self {
        self.quota_project = Some(project.into());
        self
    }

    /// Create from config.
    pub fn from_config(config: &VertexConfig) -> Self {
        Self {
            token: config.access_token.clone(),
            quota_project: config.quota_project.clone(),
        }
    }
}

impl AuthManager for BearerTokenAuthManager {
    fn get_auth_header(&self) -> Option<(String, String)> {
        self.token.as_ref().map(|token| {
            (
                "Authorization".to_string(),
                format!("Bearer {}", token.expose_secret()),
            )
        })
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.quota_project
            .iter()
            .map(|project| (QUOTA_PROJECT_HEADER.to_string(), project.clone()))
            .collect()
    }
}
