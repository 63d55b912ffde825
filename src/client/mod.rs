//! Scoped prediction client for the Vertex AI API.
//!
//! A `PredictionClient` is opened for one endpoint, used for a call and
//! released on drop.

mod builder;
mod client;

// Re-export public API
pub use builder::PredictionClientBuilder;
pub use client::PredictionClient;
