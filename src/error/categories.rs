//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The endpoint override is empty or malformed.
    #[error("Invalid API endpoint: {endpoint}")]
    InvalidEndpoint { endpoint: String },

    /// A setting holds an unusable value.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Failures while opening the scoped prediction client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientInitError {
    /// The endpoint does not yield a usable base URL.
    #[error("invalid endpoint {endpoint:?}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// No credentials were available.
    #[error("no access token configured (set VERTEX_ACCESS_TOKEN)")]
    MissingCredentials,

    /// The HTTP client could not be built.
    #[error("failed to create HTTP transport: {message}")]
    Transport { message: String },
}

/// Field-level detail attached to an `INVALID_ARGUMENT` rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// Path of the offending field, e.g. `instances[0].content`.
    pub field: String,
    /// Why the service rejected it.
    pub description: String,
}

/// Failures of the prediction call itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallError {
    /// The request never got a response.
    #[error("connection failed: {message}")]
    Network { message: String },

    /// The transport gave up waiting.
    #[error("request timed out")]
    Timeout,

    /// HTTP 400 or `INVALID_ARGUMENT`.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        message: String,
        details: Vec<ValidationDetail>,
    },

    /// HTTP 401: the token was rejected.
    #[error("unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// HTTP 403.
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// HTTP 404, usually an unknown model or project.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// HTTP 429: quota exceeded.
    #[error("resource exhausted: {message}")]
    ResourceExhausted {
        message: String,
        retry_after: Option<Duration>,
    },

    /// HTTP 503.
    #[error("service unavailable: {message}")]
    Unavailable {
        message: String,
        retry_after: Option<Duration>,
    },

    /// HTTP 504.
    #[error("deadline exceeded: {message}")]
    DeadlineExceeded { message: String },

    /// Any other non-2xx status.
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// A 2xx body that is not a predict response.
    #[error("failed to decode response: {message}")]
    Deserialization { message: String },
}

impl RemoteCallError {
    /// Server-provided backoff hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RemoteCallError::ResourceExhausted { retry_after, .. }
            | RemoteCallError::Unavailable { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub(crate) fn set_retry_after(&mut self, value: Option<Duration>) {
        if let RemoteCallError::ResourceExhausted { retry_after, .. }
        | RemoteCallError::Unavailable { retry_after, .. } = self
        {
            *retry_after = value;
        }
    }
}
