//! Text embeddings example for Vertex AI.
//!
//! This example demonstrates:
//! - Reading credentials and endpoint overrides from the environment
//! - Requesting embeddings for a prompt from a publisher model
//! - Writing the outcome as a status line to stdout
//!
//! # Usage
//!
//! Provide an OAuth2 access token:
//! ```bash
//! export VERTEX_ACCESS_TOKEN="$(gcloud auth print-access-token)"
//! ```
//!
//! Then run:
//! ```bash
//! cargo run --example generate_embeddings -- --project my-project "What is life?"
//! ```

use clap::Parser;
use std::process::ExitCode;
use integrations_vertex_embeddings::{generate_embeddings, DEFAULT_PUBLISHER};

/// Generate text embeddings with a Vertex AI publisher model.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Text to embed.
    #[arg(default_value = "What is life?")]
    prompt: String,

    /// Google Cloud project id.
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    project: String,

    /// Region serving the model.
    #[arg(long, env = "GOOGLE_CLOUD_LOCATION", default_value = "us-central1")]
    location: String,

    /// Model publisher.
    #[arg(long, default_value = DEFAULT_PUBLISHER)]
    publisher: String,

    /// Model id.
    #[arg(long, default_value = "textembedding-gecko")]
    model: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // The outcome has already been written to stdout either way.
    let mut stdout = std::io::stdout();
    match generate_embeddings(
        &mut stdout,
        &args.prompt,
        &args.project,
        &args.location,
        &args.publisher,
        &args.model,
    )
    .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
