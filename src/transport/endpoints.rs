//! Endpoint derivation for the Vertex AI prediction API.
//!
//! The service is regional: a model in `us-central1` is served by
//! `us-central1-aiplatform.googleapis.com:443`.

use url::Url;

use crate::error::ClientInitError;

/// Suffix of the predict method on a model resource.
pub const PREDICT: &str = ":predict";

/// Whether `location` can prefix the service domain as a single DNS label.
///
/// Region names are lowercase ASCII letters, digits and hyphens.
pub fn is_valid_location(location: &str) -> bool {
    !location.is_empty()
        && location.len() <= 63
        && !location.starts_with('-')
        && location
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Regional endpoint (`host:port`) for a location.
///
/// # Errors
///
/// Returns `InvalidEndpoint` when `location` is not a DNS label, since it
/// would otherwise change the host the request is sent to.
///
/// # Example
///
/// ```
/// use integrations_vertex_embeddings::transport::endpoints;
///
/// let endpoint = endpoints::regional_endpoint("us-central1", "aiplatform.googleapis.com", 443).unwrap();
/// assert_eq!(endpoint, "us-central1-aiplatform.googleapis.com:443");
///
/// assert!(endpoints::regional_endpoint("evil.example/x", "aiplatform.googleapis.com", 443).is_err());
/// ```
pub fn regional_endpoint(
    location: &str,
    service_domain: &str,
    port: u16,
) -> Result<String, ClientInitError> {
    let endpoint = format!("{}-{}:{}", location, service_domain, port);
    if is_valid_location(location) {
        Ok(endpoint)
    } else {
        Err(ClientInitError::InvalidEndpoint {
            endpoint,
            message: format!("location {:?} is not a valid region name", location),
        })
    }
}

/// Turns an endpoint into a base URL.
///
/// A bare `host:port` is served over HTTPS; an endpoint that already carries
/// a scheme is used as is.
pub fn base_url(endpoint: &str) -> Result<Url, url::ParseError> {
    if endpoint.contains("://") {
        Url::parse(endpoint)
    } else {
        Url::parse(&format!("https://{}", endpoint))
    }
}

/// Path segments of the predict method for a model resource, below the
/// version prefix.
///
/// # Example
///
/// ```
/// use integrations_vertex_embeddings::transport::endpoints;
///
/// let segments = endpoints::predict("projects/p1/locations/us-central1/publishers/google/models/m");
/// assert_eq!(segments.last().map(String::as_str), Some("m:predict"));
/// assert_eq!(segments.len(), 8);
/// ```
pub fn predict(resource_path: &str) -> Vec<String> {
    let mut segments: Vec<String> = resource_path
        .trim_start_matches('/')
        .split('/')
        .map(str::to_string)
        .collect();
    if let Some(last) = segments.last_mut() {
        last.push_str(PREDICT);
    }
    segments
}
