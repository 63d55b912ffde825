//! Observability layer for the Vertex embeddings client.
//!
//! # Example
//!
//! ```rust
//! use integrations_vertex_embeddings::observability::{Logger, StructuredLogger};
//! use integrations_vertex_embeddings::config::LogLevel;
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("vertex.embeddings")
//!     .with_level(LogLevel::Debug);
//!
//! logger.info("Requesting embedding", json!({
//!     "model": "textembedding-gecko",
//!     "location": "us-central1"
//! }));
//! ```

pub mod logging;

pub use logging::{DefaultLogger, Logger, StructuredLogger};
