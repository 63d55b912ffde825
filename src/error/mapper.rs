//! Error mapping utilities for HTTP status codes and Google API error bodies.

use serde::Deserialize;
use super::categories::*;

/// Structured error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detailed error information from the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Maps an HTTP status code and response body to a `RemoteCallError`.
///
/// The canonical `status` string in the error envelope wins over the HTTP
/// code when both are present.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> RemoteCallError {
    let (message, detail) = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(envelope) => (envelope.error.message.clone(), Some(envelope.error)),
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                (format!("HTTP {}", status), None)
            } else {
                (text, None)
            }
        }
    };

    if let Some(detail) = detail.as_ref().filter(|d| !d.status.is_empty()) {
        if let Some(mut mapped) = map_api_error(&detail.status, message.clone()) {
            if let RemoteCallError::InvalidArgument { details, .. } = &mut mapped {
                *details = parse_validation_details(&detail.details);
            }
            return mapped;
        }
    }

    match status {
        400 => RemoteCallError::InvalidArgument {
            message,
            details: detail
                .as_ref()
                .map(|d| parse_validation_details(&d.details))
                .unwrap_or_default(),
        },
        401 => RemoteCallError::Unauthenticated { message },
        403 => RemoteCallError::PermissionDenied { message },
        404 => RemoteCallError::NotFound { message },
        429 => RemoteCallError::ResourceExhausted {
            message,
            retry_after: None,
        },
        503 => RemoteCallError::Unavailable {
            message,
            retry_after: None,
        },
        504 => RemoteCallError::DeadlineExceeded { message },
        _ => RemoteCallError::Server { status, message },
    }
}

/// Maps a canonical Google status string (e.g. `NOT_FOUND`) to a category.
///
/// Returns `None` for codes that carry no more information than the HTTP
/// status itself.
pub fn map_api_error(error_status: &str, message: String) -> Option<RemoteCallError> {
    let mapped = match error_status {
        "INVALID_ARGUMENT" | "FAILED_PRECONDITION" | "OUT_OF_RANGE" => {
            RemoteCallError::InvalidArgument {
                message,
                details: vec![],
            }
        }
        "UNAUTHENTICATED" => RemoteCallError::Unauthenticated { message },
        "PERMISSION_DENIED" => RemoteCallError::PermissionDenied { message },
        "NOT_FOUND" => RemoteCallError::NotFound { message },
        "RESOURCE_EXHAUSTED" => RemoteCallError::ResourceExhausted {
            message,
            retry_after: None,
        },
        "UNAVAILABLE" => RemoteCallError::Unavailable {
            message,
            retry_after: None,
        },
        "DEADLINE_EXCEEDED" => RemoteCallError::DeadlineExceeded { message },
        _ => return None,
    };
    Some(mapped)
}

/// Parses field violations from the `details` array of an error envelope.
///
/// Handles both flat `{field, description}` entries and
/// `google.rpc.BadRequest` entries with a nested `fieldViolations` list.
fn parse_validation_details(details: &[serde_json::Value]) -> Vec<ValidationDetail> {
    let mut result = Vec::new();

    for detail in details {
        let Some(obj) = detail.as_object() else {
            continue;
        };

        if let Some(violations) = obj.get("fieldViolations").and_then(|v| v.as_array()) {
            result.extend(parse_validation_details(violations));
            continue;
        }

        let field = obj
            .get("field")
            .or_else(|| obj.get("fieldPath"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");

        let description = obj
            .get("description")
            .or_else(|| obj.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("");

        if !description.is_empty() {
            result.push(ValidationDetail {
                field: field.to_string(),
                description: description.to_string(),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_status_401() {
        let error = map_http_status_with_body(401, b"Request had invalid credentials");
        assert!(matches!(error, RemoteCallError::Unauthenticated { .. }));
    }

    #[test]
    fn test_map_http_status_429() {
        let error = map_http_status_with_body(429, b"");
        assert!(matches!(
            error,
            RemoteCallError::ResourceExhausted { retry_after: None, .. }
        ));
    }

    #[test]
    fn test_map_http_status_empty_body_uses_status_line() {
        let error = map_http_status_with_body(502, b"");
        assert_eq!(
            error,
            RemoteCallError::Server {
                status: 502,
                message: "HTTP 502".to_string(),
            }
        );
    }

    #[test]
    fn test_envelope_status_wins_over_http_code() {
        let body = r#"{"error":{"code":400,"message":"Publisher Model `projects/p1/locations/us-central1/publishers/google/models/nope` not found.","status":"NOT_FOUND"}}"#;
        let error = map_http_status_with_body(400, body.as_bytes());
        assert!(matches!(error, RemoteCallError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_argument_with_field_violations() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "Invalid instance",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.rpc.BadRequest",
                    "fieldViolations": [
                        {"field": "instances[0].content", "description": "must not be empty"}
                    ]
                }]
            }
        }"#;
        let error = map_http_status_with_body(400, body.as_bytes());
        match error {
            RemoteCallError::InvalidArgument { message, details } => {
                assert_eq!(message, "Invalid instance");
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "instances[0].content");
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_falls_back_to_http_code() {
        let body = r#"{"error":{"code":500,"message":"boom","status":"INTERNAL"}}"#;
        let error = map_http_status_with_body(500, body.as_bytes());
        assert_eq!(
            error,
            RemoteCallError::Server {
                status: 500,
                message: "boom".to_string(),
            }
        );
    }

    #[test]
    fn test_map_api_error_passthrough() {
        assert!(map_api_error("INTERNAL", "x".to_string()).is_none());
        assert!(matches!(
            map_api_error("PERMISSION_DENIED", "no".to_string()),
            Some(RemoteCallError::PermissionDenied { .. })
        ));
    }
}
