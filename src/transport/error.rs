//! Transport layer error types.

use crate::error::RemoteCallError;

/// Transport error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connecting or sending failed.
    #[error("Connection error: {0}")]
    Connection(String),
    /// No response within the configured timeout.
    #[error("Timeout")]
    Timeout,
    /// The response body could not be read.
    #[error("Request error: {0}")]
    Request(String),
}

impl From<TransportError> for RemoteCallError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => RemoteCallError::Timeout,
            TransportError::Connection(message) | TransportError::Request(message) => {
                RemoteCallError::Network { message }
            }
        }
    }
}
