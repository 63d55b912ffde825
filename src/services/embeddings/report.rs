//! Human-readable status lines for the outcome of an embeddings call.

use std::io::{self, Write};

use crate::error::VertexError;
use crate::types::Prediction;

/// Writes one status line describing `outcome` to `w`.
///
/// ```
/// use integrations_vertex_embeddings::services::write_outcome;
/// use serde_json::json;
///
/// let mut out = Vec::new();
/// write_outcome(&mut out, &Ok(json!({"embeddings": {"values": [0.5]}}))).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "embeddings generated: {\"embeddings\":{\"values\":[0.5]}}\n"
/// );
/// ```
pub fn write_outcome<W: Write + ?Sized>(
    w: &mut W,
    outcome: &Result<Prediction, VertexError>,
) -> io::Result<()> {
    match outcome {
        Ok(prediction) => writeln!(w, "embeddings generated: {}", prediction),
        Err(err @ VertexError::ClientInit(_)) => {
            writeln!(w, "unable to create prediction client: {}", err)
        }
        Err(err @ VertexError::PayloadEncoding { .. }) => {
            writeln!(w, "unable to convert prompt to Value: {}", err)
        }
        Err(err @ (VertexError::RemoteCall(_) | VertexError::EmptyResult { .. })) => {
            writeln!(w, "error in prediction: {}", err)
        }
        Err(err @ VertexError::Configuration(_)) => {
            writeln!(w, "invalid configuration: {}", err)
        }
        Err(err @ VertexError::Output { .. }) => writeln!(w, "{}", err),
    }
}
