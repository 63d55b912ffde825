//! Text embeddings on Vertex AI publisher models.

mod report;
mod service;

use async_trait::async_trait;
use crate::error::VertexError;
use crate::types::{Prediction, PredictionTarget};

pub use report::write_outcome;
pub use service::{generate_embeddings, EmbeddingRequester};

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingsService: Send + Sync {
    /// Embed `prompt` with the model named by `target`.
    ///
    /// Returns the first prediction of the response, unchanged.
    async fn generate_embeddings(
        &self,
        prompt: &str,
        target: &PredictionTarget,
    ) -> Result<Prediction, VertexError>;
}
