use inbox_core::config::CompletionConfig;
use inbox_interaction::{CompletionError, CompletionService, OpenAiCompletionClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: &str) -> OpenAiCompletionClient {
    let config = CompletionConfig::new(api_key).with_base_url(format!("{}/v1", server.uri()));
    OpenAiCompletionClient::new(config)
}

#[tokio::test]
async fn test_complete_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [
                {"role": "system"},
                {"role": "user", "content": "Can you summarize this conversation?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "The customer wants a refund."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "sk-test");
    let text = client
        .complete("Can you summarize this conversation?")
        .await
        .expect("completion should succeed");

    assert_eq!(text, "The customer wants a refund.");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "You didn't provide an API key.", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.complete("hello").await.unwrap_err();

    match err {
        CompletionError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "You didn't provide an API key.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, "sk-test");
    let err = client.complete("hello").await.unwrap_err();
    assert!(matches!(err, CompletionError::Parse(_)));
}

#[tokio::test]
async fn test_null_content_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "sk-test");
    let err = client.complete("hello").await.unwrap_err();
    assert!(matches!(err, CompletionError::EmptyResponse));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_request_error() {
    let server = MockServer::start().await;
    let base_url = format!("{}/v1", server.uri());
    drop(server);

    let client = OpenAiCompletionClient::new(CompletionConfig::new("sk-test").with_base_url(base_url));
    let err = client.complete("hello").await.unwrap_err();
    assert!(matches!(err, CompletionError::Request(_)));
}
