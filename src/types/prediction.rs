//! Prediction request/response types for the Vertex AI API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single prediction, kept as the generic JSON value the service returned.
pub type Prediction = Value;

/// Coordinates of a publisher model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionTarget {
    /// Google Cloud project id.
    pub project: String,
    /// Region, e.g. `us-central1`.
    pub location: String,
    /// Model publisher, e.g. `google`.
    pub publisher: String,
    /// Model id, e.g. `textembedding-gecko`.
    pub model: String,
}

impl PredictionTarget {
    /// Creates a target from its four coordinates.
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        publisher: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            publisher: publisher.into(),
            model: model.into(),
        }
    }

    /// Fully-qualified model resource name.
    ///
    /// ```
    /// use integrations_vertex_embeddings::types::PredictionTarget;
    ///
    /// let target = PredictionTarget::new("p1", "us-central1", "google", "textembedding-gecko");
    /// assert_eq!(
    ///     target.resource_path(),
    ///     "projects/p1/locations/us-central1/publishers/google/models/textembedding-gecko"
    /// );
    /// ```
    pub fn resource_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/publishers/{}/models/{}",
            self.project, self.location, self.publisher, self.model
        )
    }
}

/// Instance payload for text embedding models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptPayload {
    /// The text to embed.
    pub content: String,
}

impl PromptPayload {
    /// Wraps a prompt.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Converts the payload into the generic value the service expects.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Body of a `:predict` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    /// Resource name of the model; selects the URL, not part of the body.
    #[serde(skip)]
    pub endpoint: String,
    /// One generic value per input.
    pub instances: Vec<Value>,
}

/// Response of a `:predict` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    /// One prediction per instance, in request order.
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    /// Id of the deployed model that served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_model_id: Option<String>,
    /// Resource name of the model that served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Version of the model that served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version_id: Option<String>,
}
