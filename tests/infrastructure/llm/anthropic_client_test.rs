use std::time::Duration;

use papersum::application::ports::{GenerationRequest, ProviderError, TextGenerator};
use papersum::infrastructure::llm::{
    ANTHROPIC_DEFAULT_RESPONSE_TOKENS, ANTHROPIC_VERSION, AnthropicClient,
};

use super::mock_server::start_mock_provider;

const ROUTE: &str = "/v1/messages";

fn request() -> GenerationRequest {
    GenerationRequest {
        model: "claude-3-5-sonnet-20241022".to_string(),
        system_prompt: "You are a careful reviewer.".to_string(),
        user_prompt: "Summarize the paper.".to_string(),
        temperature: 0.3,
        max_response_tokens: 2048,
    }
}

fn client(base_url: &str) -> AnthropicClient {
    AnthropicClient::new(
        "anthropic-test".to_string(),
        Some(base_url.to_string()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_text_blocks_when_generating_then_joins_text_content() {
    let server = start_mock_provider(
        ROUTE,
        200,
        r#"{"content":[{"type":"text","text":"Part one. "},{"type":"text","text":"Part two."}]}"#,
    )
    .await;

    let result = client(&server.base_url).generate(&request()).await;

    assert_eq!(result.unwrap(), "Part one. Part two.");
    server.shutdown();
}

#[tokio::test]
async fn given_request_when_generating_then_sends_version_header_and_top_level_system() {
    let server = start_mock_provider(
        ROUTE,
        200,
        r#"{"content":[{"type":"text","text":"ok"}]}"#,
    )
    .await;

    client(&server.base_url).generate(&request()).await.unwrap();

    let captured = server.requests();
    let sent = &captured[0];
    assert_eq!(sent.headers["x-api-key"], "anthropic-test");
    assert_eq!(sent.headers["anthropic-version"], ANTHROPIC_VERSION);
    assert_eq!(sent.body["system"], "You are a careful reviewer.");
    assert_eq!(sent.body["max_tokens"], 2048);
    assert_eq!(sent.body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(sent.body["messages"][0]["role"], "user");
    server.shutdown();
}

#[tokio::test]
async fn given_low_credit_balance_when_generating_then_returns_quota_exceeded() {
    let server = start_mock_provider(
        ROUTE,
        400,
        r#"{"type":"error","error":{"type":"invalid_request_error","message":"Your credit balance is too low to access the Anthropic API."}}"#,
    )
    .await;

    let result = client(&server.base_url).generate(&request()).await;

    assert!(matches!(result, Err(ProviderError::QuotaExceeded(_))));
    server.shutdown();
}

#[tokio::test]
async fn given_overloaded_provider_when_generating_then_returns_rate_limited() {
    let server = start_mock_provider(
        ROUTE,
        429,
        r#"{"type":"error","error":{"type":"rate_limit_error","message":"Too many requests"}}"#,
    )
    .await;

    let result = client(&server.base_url).generate(&request()).await;

    assert!(matches!(result, Err(ProviderError::RateLimited(_))));
    server.shutdown();
}

#[tokio::test]
async fn given_server_error_when_generating_then_keeps_raw_body() {
    let server = start_mock_provider(ROUTE, 500, r#"{"error":"internal"}"#).await;

    let result = client(&server.base_url).generate(&request()).await;

    match result {
        Err(ProviderError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("internal"));
        }
        other => panic!("expected api failure, got {:?}", other),
    }
    server.shutdown();
}

#[tokio::test]
async fn given_no_text_blocks_when_generating_then_returns_invalid_response() {
    let server = start_mock_provider(ROUTE, 200, r#"{"content":[]}"#).await;

    let result = client(&server.base_url).generate(&request()).await;

    assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    server.shutdown();
}

#[test]
fn given_anthropic_client_when_asking_default_budget_then_returns_provider_default() {
    let client = AnthropicClient::new("k".to_string(), None, Duration::from_secs(5)).unwrap();
    assert_eq!(client.default_response_tokens(), ANTHROPIC_DEFAULT_RESPONSE_TOKENS);
}
