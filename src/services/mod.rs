//! Service implementations for the Vertex AI prediction API.

pub mod embeddings;

pub use embeddings::*;
