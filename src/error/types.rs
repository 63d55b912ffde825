//! Main error type for the Vertex embeddings client.

use std::time::Duration;
use thiserror::Error;
use super::categories::*;

/// Result type alias for Vertex operations.
pub type VertexResult<T> = Result<T, VertexError>;

/// Top-level error type, tagged by the step that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VertexError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The prediction client could not be opened.
    #[error("{0}")]
    ClientInit(#[from] ClientInitError),

    /// The prompt could not be encoded.
    #[error("{message}")]
    PayloadEncoding { message: String },

    /// The predict call failed.
    #[error("{0}")]
    RemoteCall(#[from] RemoteCallError),

    /// The call succeeded without any prediction.
    #[error("no predictions returned for {endpoint}")]
    EmptyResult { endpoint: String },

    /// The status line could not be written.
    #[error("failed to write to output: {message}")]
    Output { message: String },
}

impl VertexError {
    /// Returns true if repeating the same call may succeed.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VertexError::RemoteCall(
                RemoteCallError::Network { .. }
                    | RemoteCallError::Timeout
                    | RemoteCallError::ResourceExhausted { .. }
                    | RemoteCallError::Unavailable { .. }
                    | RemoteCallError::DeadlineExceeded { .. }
            )
        )
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            VertexError::RemoteCall(e) => e.retry_after(),
            _ => None,
        }
    }
}
