//! OpenAI-compatible client against a mocked chat-completions endpoint.

use lifeware::gateway::assistant::{CONNECTION_FALLBACK, EMPTY_REPLY};
use lifeware::gateway::HealthAssistant;
use lifeware::llm::{ConfiguredLLMFactory, GenerationSettings, LLMClient, OpenAICompatibleClient};
use lifeware::types::{AppError, ChatRole, ChatTurn};
use lifeware::utils::toml_config::{LifewareConfig, LifewareConfigManager};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAICompatibleClient {
    OpenAICompatibleClient::new(
        "sk-test".to_string(),
        format!("{}/v1/", server.uri()),
        "gpt-3.5-turbo".to_string(),
        GenerationSettings {
            max_tokens: 500,
            temperature: 0.7,
            timeout: Duration::from_secs(5),
        },
    )
    .expect("client should build")
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_generate_with_system_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 500,
            "messages": [
                { "role": "system", "content": "Be kind." },
                { "role": "user", "content": "Hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Hello there.  ")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.generate_with_system("Be kind.", "Hi").await.unwrap();
    assert_eq!(reply, "Hello there.");
    assert_eq!(client.model_name(), "gpt-3.5-turbo");
}

#[tokio::test]
async fn test_history_is_sent_between_system_and_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "What is Thalassemia?" },
                { "role": "assistant", "content": "A blood disorder." },
                { "role": "user", "content": "Is it inherited?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Yes.")))
        .expect(1)
        .mount(&server)
        .await;

    let history = vec![
        ChatTurn {
            role: ChatRole::User,
            content: "What is Thalassemia?".to_string(),
        },
        ChatTurn {
            role: ChatRole::Assistant,
            content: "A blood disorder.".to_string(),
        },
    ];

    let reply = client_for(&server)
        .generate_with_history("sys", &history, "Is it inherited?")
        .await
        .unwrap();
    assert_eq!(reply, "Yes.");
}

#[tokio::test]
async fn test_empty_choices_is_an_empty_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .generate_with_system("sys", "Hi")
        .await
        .unwrap();
    assert_eq!(reply, "");
}

#[tokio::test]
async fn test_malformed_body_is_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_with_system("sys", "Hi")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::LLM(_)));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    match client_for(&server).generate_with_system("sys", "Hi").await {
        Err(AppError::LLM(msg)) => {
            assert!(msg.contains("401"));
            assert!(msg.contains("Incorrect API key"));
        }
        other => panic!("expected LLM error, got {:?}", other),
    }
}

// ============= Through the assistant =============

/// Assistant wired to the real client, pointed at the mock server. Each
/// test passes its own key variable so parallel tests don't collide.
fn assistant_for(server: &MockServer, key_env: &str) -> HealthAssistant {
    std::env::set_var(key_env, "sk-test");

    let mut config = LifewareConfig::default();
    config.assistant.api_key_env = key_env.to_string();
    config.assistant.api_base = Some(format!("{}/v1", server.uri()));
    config.assistant.timeout_secs = 5;

    let manager = Arc::new(LifewareConfigManager::from_config(config));
    HealthAssistant::new(Arc::new(ConfiguredLLMFactory::new(manager.clone()))).with_config(manager)
}

#[tokio::test]
async fn test_assistant_apologizes_for_empty_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = assistant_for(&server, "LIFEWARE_TEST_KEY_EMPTY_CONTENT")
        .reply("hi", &[])
        .await
        .unwrap();
    assert_eq!(response.reply, EMPTY_REPLY);
    assert!(!response.fallback);
}

#[tokio::test]
async fn test_assistant_apologizes_for_missing_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let response = assistant_for(&server, "LIFEWARE_TEST_KEY_NO_CHOICES")
        .reply("hi", &[])
        .await
        .unwrap();
    assert_eq!(response.reply, EMPTY_REPLY);
    assert!(!response.fallback);
}

#[tokio::test]
async fn test_assistant_falls_back_on_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let response = assistant_for(&server, "LIFEWARE_TEST_KEY_SERVER_ERROR")
        .reply("hi", &[])
        .await
        .unwrap();
    assert_eq!(response.reply, CONNECTION_FALLBACK);
    assert!(response.fallback);
}
