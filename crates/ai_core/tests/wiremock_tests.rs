//! Integration tests for the completion client using WireMock
//!
//! These tests stub the chat-completions HTTP API to verify request building
//! and response normalization without a real endpoint.

use ai_core::{LanguageConfig, OpenAiCompletionClient};
use application::CompletionPort;
use domain::{CapabilityError, Conversation};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for_mock(base_url: &str) -> LanguageConfig {
    LanguageConfig {
        api_key: "test-api-key".to_string(),
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        timeout_ms: 5000,
    }
}

fn client_for_mock(mock_server: &MockServer) -> OpenAiCompletionClient {
    OpenAiCompletionClient::new(config_for_mock(&mock_server.uri()))
        .expect("Failed to create client")
}

fn single_user_conversation(text: &str) -> Conversation {
    let mut conversation = Conversation::new();
    conversation.add_user_message(text);
    conversation
}

#[tokio::test]
async fn complete_success_extracts_reply_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "messages": [{"role": "system", "content": "persona"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "test-model",
            "choices": [{"message": {"content": "hi there"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for_mock(&mock_server);
    let conversation = single_user_conversation("hello");

    let reply = client.complete("persona", &conversation).await.unwrap();

    assert_eq!(reply.content, "hi there");
    assert_eq!(reply.model.as_deref(), Some("test-model"));
}

#[tokio::test]
async fn complete_takes_first_of_multiple_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for_mock(&mock_server);
    let conversation = single_user_conversation("pick one");

    let reply = client.complete("persona", &conversation).await.unwrap();

    assert_eq!(reply.content, "first");
    assert!(reply.model.is_none());
}

#[tokio::test]
async fn complete_sends_persona_and_history_in_order() {
    let mock_server = MockServer::start().await;

    let mut conversation = Conversation::new();
    conversation.add_user_message("hello");
    conversation.add_assistant_message("hi");
    conversation.add_user_message("and now?");

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(serde_json::json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi"},
                {"role": "user", "content": "and now?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "now this"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for_mock(&mock_server);
    let reply = client
        .complete("You are terse.", &conversation)
        .await
        .unwrap();

    assert_eq!(reply.content, "now this");
}

#[tokio::test]
async fn complete_maps_non_success_to_remote_with_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let client = client_for_mock(&mock_server);
    let conversation = single_user_conversation("x");

    let err = client.complete("persona", &conversation).await.unwrap_err();

    match err {
        CapabilityError::Remote { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "rate limited");
        },
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn complete_fails_for_every_non_success_status() {
    for status in [400_u16, 401, 403, 404, 429, 503] {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server);
        let conversation = single_user_conversation("x");

        let err = client.complete("persona", &conversation).await.unwrap_err();
        assert_eq!(err.status(), Some(status), "status {status}");
    }
}

#[tokio::test]
async fn complete_maps_unparseable_body_to_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let client = client_for_mock(&mock_server);
    let conversation = single_user_conversation("x");

    let err = client.complete("persona", &conversation).await.unwrap_err();
    assert!(matches!(err, CapabilityError::MalformedResponse(_)));
}

#[tokio::test]
async fn complete_maps_empty_choices_to_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for_mock(&mock_server);
    let conversation = single_user_conversation("x");

    let err = client.complete("persona", &conversation).await.unwrap_err();
    assert!(matches!(err, CapabilityError::MalformedResponse(_)));
}

#[tokio::test]
async fn complete_maps_unreachable_endpoint_to_network() {
    // port 1 is never listening
    let client = OpenAiCompletionClient::new(config_for_mock("http://127.0.0.1:1")).unwrap();
    let conversation = single_user_conversation("x");

    let err = client.complete("persona", &conversation).await.unwrap_err();
    assert!(matches!(err, CapabilityError::Network(_)));
}
