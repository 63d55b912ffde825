//! Integration tests for the embeddings requester.

use integrations_vertex_embeddings::fixtures::load_fixture;
use integrations_vertex_embeddings::mocks::{MockAuthManager, MockHttpTransport, MockLogger};
use integrations_vertex_embeddings::services::{EmbeddingRequester, EmbeddingsService};
use integrations_vertex_embeddings::transport::{HttpMethod, TransportError};
use integrations_vertex_embeddings::types::PredictionTarget;
use integrations_vertex_embeddings::{ClientInitError, RemoteCallError, VertexConfig, VertexError};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;

const PREDICT_URL: &str = "https://us-central1-aiplatform.googleapis.com/v1/projects/p1/locations/us-central1/publishers/google/models/textembedding-gecko:predict";

/// Helper to create a requester with mock transport, credentials and logger.
fn create_test_requester(
    transport: Arc<MockHttpTransport>,
    logger: Arc<MockLogger>,
) -> EmbeddingRequester {
    let config = VertexConfig::builder()
        .access_token(SecretString::new("test-token".into()))
        .build()
        .unwrap();

    EmbeddingRequester::new(config)
        .with_auth_manager(Arc::new(MockAuthManager::new("test-token")))
        .with_transport(transport)
        .with_logger(logger)
}

fn gecko() -> PredictionTarget {
    PredictionTarget::new("p1", "us-central1", "google", "textembedding-gecko")
}

#[tokio::test]
async fn test_what_is_life_end_to_end() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("predict/success_response.json"));
    let requester = create_test_requester(transport.clone(), Arc::new(MockLogger::new()));

    // Act
    let mut out = Vec::new();
    let result = requester
        .write_embeddings(&mut out, "What is life?", "p1", "us-central1", "google", "textembedding-gecko")
        .await;

    // Assert
    assert!(result.is_ok(), "Expected success, got {:?}", result);

    transport.verify_request_count(1);
    transport.verify_request(0, HttpMethod::Post, PREDICT_URL);
    transport.verify_header(0, "Authorization", "Bearer test-token");
    assert_eq!(
        transport.request_body_json(0),
        json!({"instances": [{"content": "What is life?"}]})
    );

    let fixture: Value = serde_json::from_str(&load_fixture("predict/success_response.json")).unwrap();
    let expected = format!("embeddings generated: {}\n", fixture["predictions"][0]);
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[tokio::test]
async fn test_prompt_is_sent_verbatim() {
    let prompts = ["", "multi\nline \"quoted\" text", "日本語のテキスト", "emoji 🦀 and \t tabs"];

    for prompt in prompts {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, r#"{"predictions":[{"embeddings":{"values":[0.0]}}]}"#);

        create_test_requester(transport.clone(), Arc::new(MockLogger::new()))
            .generate_embeddings(prompt, &gecko())
            .await
            .unwrap();

        let body = transport.request_body_json(0);
        let instances = body["instances"].as_array().unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0], json!({ "content": prompt }));
    }
}

#[tokio::test]
async fn test_resource_path_follows_coordinates() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, r#"{"predictions":[{"embeddings":{"values":[0.0]}}]}"#);

    let target = PredictionTarget::new("my-project", "europe-west4", "acme", "text-multilingual-embedding-002");
    create_test_requester(transport.clone(), Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &target)
        .await
        .unwrap();

    transport.verify_request(
        0,
        HttpMethod::Post,
        "https://europe-west4-aiplatform.googleapis.com/v1/projects/my-project/locations/europe-west4/publishers/acme/models/text-multilingual-embedding-002:predict",
    );
}

#[tokio::test]
async fn test_first_prediction_returned_unchanged() {
    let transport = Arc::new(MockHttpTransport::new());
    let first = json!({
        "embeddings": {
            "statistics": {"truncated": false, "token_count": 3},
            "values": [0.1, -0.2, 0.3]
        },
        "extra": {"nested": [1, 2, {"deep": null}]}
    });
    let body = json!({
        "predictions": [first, {"embeddings": {"values": [9.9]}}],
        "deployedModelId": "123"
    });
    transport.enqueue_json_response(200, &body.to_string());

    let prediction = create_test_requester(transport, Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &gecko())
        .await
        .unwrap();

    assert_eq!(prediction, first);
}

#[tokio::test]
async fn test_empty_predictions_fail_with_empty_result() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("predict/empty_predictions.json"));

    let mut out = Vec::new();
    let error = create_test_requester(transport, Arc::new(MockLogger::new()))
        .write_embeddings(&mut out, "What is life?", "p1", "us-central1", "google", "textembedding-gecko")
        .await
        .unwrap_err();

    assert_eq!(
        error,
        VertexError::EmptyResult {
            endpoint: gecko().resource_path(),
        }
    );
    assert!(String::from_utf8(out).unwrap().starts_with("error in prediction: "));
}

#[tokio::test]
async fn test_unknown_model_is_remote_error_without_result() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(404, &load_fixture("predict/not_found_error.json"));

    let mut out = Vec::new();
    let error = create_test_requester(transport, Arc::new(MockLogger::new()))
        .write_embeddings(&mut out, "What is life?", "p1", "us-central1", "google", "no-such-model")
        .await
        .unwrap_err();

    assert!(matches!(error, VertexError::RemoteCall(RemoteCallError::NotFound { .. })));

    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("error in prediction: not found: "));
    assert!(!output.contains("embeddings generated"));
}

#[tokio::test]
async fn test_invalid_argument_carries_field_violations() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(400, &load_fixture("predict/invalid_argument_error.json"));

    let error = create_test_requester(transport, Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &gecko())
        .await
        .unwrap_err();

    match error {
        VertexError::RemoteCall(RemoteCallError::InvalidArgument { details, .. }) => {
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].field, "instances[0]");
        }
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[tokio::test]
async fn test_network_failure_is_remote_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_error(TransportError::Connection("connection refused".to_string()));

    let error = create_test_requester(transport, Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &gecko())
        .await
        .unwrap_err();

    assert!(matches!(error, VertexError::RemoteCall(RemoteCallError::Network { .. })));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_undecodable_success_body_is_remote_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, "<html>not json</html>");

    let error = create_test_requester(transport, Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &gecko())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        VertexError::RemoteCall(RemoteCallError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn test_client_init_failure_sends_no_request() {
    let transport = Arc::new(MockHttpTransport::new());
    let requester = create_test_requester(transport.clone(), Arc::new(MockLogger::new()))
        .with_auth_manager(Arc::new(MockAuthManager::without_token()));

    let mut out = Vec::new();
    let error = requester
        .write_embeddings(&mut out, "What is life?", "p1", "us-central1", "google", "textembedding-gecko")
        .await
        .unwrap_err();

    assert_eq!(error, VertexError::ClientInit(ClientInitError::MissingCredentials));
    transport.verify_request_count(0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "unable to create prediction client: no access token configured (set VERTEX_ACCESS_TOKEN)\n"
    );
}

#[tokio::test]
async fn test_invalid_location_is_client_init_error() {
    let transport = Arc::new(MockHttpTransport::new());

    let target = PredictionTarget::new("p1", "us central1", "google", "textembedding-gecko");
    let error = create_test_requester(transport.clone(), Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &target)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        VertexError::ClientInit(ClientInitError::InvalidEndpoint { .. })
    ));
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_location_cannot_redirect_host() {
    let locations = ["evil.example/x", "evil.example#", "evil.example?", "user@evil.example", "evil.example:443"];

    for location in locations {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, r#"{"predictions":[{"embeddings":{"values":[0.0]}}]}"#);

        let target = PredictionTarget::new("p1", location, "google", "textembedding-gecko");
        let error = create_test_requester(transport.clone(), Arc::new(MockLogger::new()))
            .generate_embeddings("hello", &target)
            .await
            .unwrap_err();

        assert!(
            matches!(error, VertexError::ClientInit(ClientInitError::InvalidEndpoint { .. })),
            "location {:?} gave {:?}",
            location,
            error
        );
        transport.verify_request_count(0);
    }
}

#[tokio::test]
async fn test_reserved_characters_in_model_stay_in_path() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, r#"{"predictions":[{"embeddings":{"values":[0.0]}}]}"#);

    let target = PredictionTarget::new("p1", "us-central1", "google", "m#frag?x");
    create_test_requester(transport.clone(), Arc::new(MockLogger::new()))
        .generate_embeddings("hello", &target)
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().unwrap().url,
        "https://us-central1-aiplatform.googleapis.com/v1/projects/p1/locations/us-central1/publishers/google/models/m%23frag%3Fx:predict"
    );
}

#[tokio::test]
async fn test_client_released_on_every_path() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("predict/success_response.json"));
    transport.enqueue_json_response(401, &load_fixture("predict/unauthenticated_error.json"));
    transport.enqueue_json_response(200, &load_fixture("predict/empty_predictions.json"));
    transport.enqueue_error(TransportError::Timeout);

    let logger = Arc::new(MockLogger::new());
    let requester = create_test_requester(transport.clone(), logger.clone());
    let baseline = Arc::strong_count(&transport);

    assert!(requester.generate_embeddings("a", &gecko()).await.is_ok());
    assert!(matches!(
        requester.generate_embeddings("b", &gecko()).await,
        Err(VertexError::RemoteCall(RemoteCallError::Unauthenticated { .. }))
    ));
    assert!(matches!(
        requester.generate_embeddings("c", &gecko()).await,
        Err(VertexError::EmptyResult { .. })
    ));
    assert!(matches!(
        requester.generate_embeddings("d", &gecko()).await,
        Err(VertexError::RemoteCall(RemoteCallError::Timeout))
    ));

    assert_eq!(logger.count("Prediction client opened"), 4);
    assert_eq!(logger.count("Prediction client released"), 4);
    assert_eq!(Arc::strong_count(&transport), baseline);
}

#[tokio::test]
async fn test_outcome_is_logged_with_model() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("predict/success_response.json"));
    let logger = Arc::new(MockLogger::new());

    create_test_requester(transport, logger.clone())
        .generate_embeddings("hello", &gecko())
        .await
        .unwrap();

    let fields = logger.find("Embeddings generated").unwrap();
    assert_eq!(fields["model"], gecko().resource_path());
}
