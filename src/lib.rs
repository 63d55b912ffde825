//! # Vertex AI Text Embeddings Client
//!
//! Rust client for text embedding models served by the Google Vertex AI
//! prediction API.
//!
//! ## Features
//!
//! - Regional endpoint derivation from the model's location
//! - One scoped prediction client per call, released on every exit path
//! - Structured errors tagged by the step that failed
//! - Google error envelopes mapped to typed remote-call categories
//! - Secure credential handling with `SecretString`
//! - Structured logging through `tracing`
//! - Mock transport and fixtures for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_vertex_embeddings::generate_embeddings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials come from VERTEX_ACCESS_TOKEN
//!     let mut out = std::io::stdout();
//!     generate_embeddings(
//!         &mut out,
//!         "What is life?",
//!         "p1",
//!         "us-central1",
//!         "google",
//!         "textembedding-gecko",
//!     )
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `services` - Embedding requester and caller-facing entry point
//! - `client` - Scoped prediction client and its builder
//! - `config` - Configuration types and builder
//! - `auth` - Bearer token authentication
//! - `transport` - HTTP transport layer and endpoint derivation
//! - `error` - Error types and taxonomy
//! - `types` - Prediction request/response types

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod mocks;
pub mod fixtures;

// Re-exports for convenience
pub use auth::{AuthManager, BearerTokenAuthManager};
pub use client::{PredictionClient, PredictionClientBuilder};
pub use config::{
    LogLevel, VertexConfig, VertexConfigBuilder, DEFAULT_API_VERSION, DEFAULT_PORT,
    DEFAULT_PUBLISHER, DEFAULT_SERVICE_DOMAIN,
};
pub use error::{
    // Main error types
    VertexError,
    VertexResult,
    // Error categories
    ClientInitError,
    ConfigurationError,
    RemoteCallError,
    ValidationDetail,
    // Error mapping utilities
    map_api_error,
    map_http_status_with_body,
};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};

// Type re-exports
pub use types::{PredictRequest, PredictResponse, Prediction, PredictionTarget, PromptPayload};

// Service re-exports
pub use services::{generate_embeddings, write_outcome, EmbeddingRequester, EmbeddingsService};

// Observability re-exports
pub use observability::{DefaultLogger, Logger, StructuredLogger};
