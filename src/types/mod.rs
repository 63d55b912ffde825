//! Core types for the Vertex AI prediction API.

pub mod prediction;

pub use prediction::{
    PredictRequest, PredictResponse, Prediction, PredictionTarget, PromptPayload,
};
