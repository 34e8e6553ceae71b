//! Provider adapter tests
//!
//! Each test drives an adapter against a local mock endpoint; no real
//! vendor traffic is involved.

use aifallback::config::settings::VendorConfig;
use aifallback::models::ProviderId;
use aifallback::providers::{
    AnthropicProvider, DeepSeekProvider, GeminiProvider, GroqProvider, OpenAIProvider, Provider,
};
use httpmock::prelude::*;

fn vendor_config(api_key: Option<&str>, base_url: &str, model: &str) -> VendorConfig {
    VendorConfig {
        api_key: api_key.map(str::to_string),
        base_url: base_url.to_string(),
        model: model.to_string(),
    }
}

fn completion_body(model: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": model,
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12}
    })
}

#[tokio::test]
async fn test_openai_provider_happy_path() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body(serde_json::json!({
                    "model": "gpt-4o-mini",
                    "messages": [
                        {"role": "system", "content": "Be brief"},
                        {"role": "user", "content": "Hello"}
                    ]
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("gpt-4o-mini", "Hello from the mock!"));
        })
        .await;

    let provider = OpenAIProvider::new(
        vendor_config(Some("sk-test"), &server.base_url(), "gpt-4o-mini"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", Some("Be brief")).await.unwrap();
    assert_eq!(reply.provider, ProviderId::OpenAi);
    assert_eq!(reply.model, "gpt-4o-mini");
    assert_eq!(reply.text, "Hello from the mock!");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_provider_omits_system_message_when_absent() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .json_body(serde_json::json!({
                    "model": "gpt-4o-mini",
                    "messages": [
                        {"role": "user", "content": "Hello"}
                    ]
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("gpt-4o-mini", "Hi"));
        })
        .await;

    let provider = OpenAIProvider::new(
        vendor_config(Some("sk-test"), &server.base_url(), "gpt-4o-mini"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", None).await.unwrap();
    assert_eq!(reply.text, "Hi");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_provider_embeds_api_error_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "error": {
                        "message": "Incorrect API key provided",
                        "type": "invalid_request_error",
                        "code": "invalid_api_key"
                    }
                }));
        })
        .await;

    let provider = OpenAIProvider::new(
        vendor_config(Some("sk-bad"), &server.base_url(), "gpt-4o-mini"),
        5,
    )
    .unwrap();

    let error = provider.invoke("Hello", None).await.unwrap_err();
    assert_eq!(
        error.to_string(),
        "OpenAI API error: Incorrect API key provided"
    );
}

#[tokio::test]
async fn test_openai_provider_rejects_blank_answer() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("gpt-4o-mini", "   \n  "));
        })
        .await;

    let provider = OpenAIProvider::new(
        vendor_config(Some("sk-test"), &server.base_url(), "gpt-4o-mini"),
        5,
    )
    .unwrap();

    let error = provider.invoke("Hello", None).await.unwrap_err();
    assert!(error.to_string().contains("OpenAI returned empty response"));
}

#[tokio::test]
async fn test_openai_provider_missing_credential_skips_network() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("gpt-4o-mini", "unreachable"));
        })
        .await;

    let provider = OpenAIProvider::new(
        vendor_config(None, &server.base_url(), "gpt-4o-mini"),
        5,
    )
    .unwrap();

    let error = provider.invoke("Hello", None).await.unwrap_err();
    assert!(error.to_string().contains("OPENAI_API_KEY missing"));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_anthropic_provider_happy_path() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/messages")
                .header("x-api-key", "sk-ant-test")
                .header("anthropic-version", "2023-06-01")
                .json_body(serde_json::json!({
                    "model": "claude-3-5-haiku-20241022",
                    "max_tokens": 1024,
                    "system": "Be brief",
                    "messages": [
                        {"role": "user", "content": "Hello"}
                    ]
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "id": "msg_01ABC123",
                    "type": "message",
                    "role": "assistant",
                    "content": [
                        {"type": "text", "text": "Hello from Claude"}
                    ],
                    "model": "claude-3-5-haiku-20241022",
                    "stop_reason": "end_turn",
                    "usage": {"input_tokens": 10, "output_tokens": 5}
                }));
        })
        .await;

    let provider = AnthropicProvider::new(
        vendor_config(Some("sk-ant-test"), &server.base_url(), "claude-3-5-haiku-20241022"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", Some("Be brief")).await.unwrap();
    assert_eq!(reply.provider, ProviderId::Anthropic);
    assert_eq!(reply.model, "claude-3-5-haiku-20241022");
    assert_eq!(reply.text, "Hello from Claude");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_anthropic_provider_embeds_api_error_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/messages");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "type": "error",
                    "error": {"type": "authentication_error", "message": "invalid x-api-key"}
                }));
        })
        .await;

    let provider = AnthropicProvider::new(
        vendor_config(Some("sk-ant-bad"), &server.base_url(), "claude-3-5-haiku-20241022"),
        5,
    )
    .unwrap();

    let error = provider.invoke("Hello", None).await.unwrap_err();
    assert_eq!(error.to_string(), "Anthropic API error: invalid x-api-key");
}

#[tokio::test]
async fn test_gemini_provider_happy_path() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.0-flash:generateContent")
                .query_param("key", "secret-key")
                .json_body(serde_json::json!({
                    "contents": [
                        {"role": "user", "parts": [{"text": "Hello"}]}
                    ]
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [
                        {
                            "content": {
                                "parts": [{"text": "Hello from Gemini"}],
                                "role": "model"
                            },
                            "finishReason": "STOP"
                        }
                    ]
                }));
        })
        .await;

    let provider = GeminiProvider::new(
        vendor_config(Some("secret-key"), &server.base_url(), "gemini-2.0-flash"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", None).await.unwrap();
    assert_eq!(reply.provider, ProviderId::Gemini);
    assert_eq!(reply.model, "gemini-2.0-flash");
    assert_eq!(reply.text, "Hello from Gemini");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_provider_send_error_does_not_leak_key() {
    // Nothing listens on port 9, so the send itself fails
    let provider = GeminiProvider::new(
        vendor_config(Some("very-secret-key"), "http://127.0.0.1:9", "gemini-2.0-flash"),
        5,
    )
    .unwrap();

    let error = provider.invoke("Hello", None).await.unwrap_err();
    let rendered = format!("{:#}", error);
    assert!(rendered.contains("Failed to send Gemini request"));
    assert!(!rendered.contains("very-secret-key"));
    assert!(!rendered.contains("key="));
}

#[tokio::test]
async fn test_gemini_provider_embeds_api_error_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/models/gemini-2.0-flash:generateContent");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "error": {
                        "code": 400,
                        "message": "API key not valid. Please pass a valid API key.",
                        "status": "INVALID_ARGUMENT"
                    }
                }));
        })
        .await;

    let provider = GeminiProvider::new(
        vendor_config(Some("bad-key"), &server.base_url(), "gemini-2.0-flash"),
        5,
    )
    .unwrap();

    let error = provider.invoke("Hello", None).await.unwrap_err();
    assert!(error.to_string().starts_with("Gemini API error: API key not valid"));
}

#[tokio::test]
async fn test_groq_provider_happy_path() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer gsk-test");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("llama-3.3-70b-versatile", "Hello from Groq"));
        })
        .await;

    let provider = GroqProvider::new(
        vendor_config(Some("gsk-test"), &server.base_url(), "llama-3.3-70b-versatile"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", None).await.unwrap();
    assert_eq!(reply.provider, ProviderId::Groq);
    assert_eq!(reply.model, "llama-3.3-70b-versatile");
    assert_eq!(reply.text, "Hello from Groq");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_deepseek_provider_happy_path() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-ds-test");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("deepseek-chat", "Hello from DeepSeek"));
        })
        .await;

    let provider = DeepSeekProvider::new(
        vendor_config(Some("sk-ds-test"), &server.base_url(), "deepseek-chat"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", None).await.unwrap();
    assert_eq!(reply.provider, ProviderId::DeepSeek);
    assert_eq!(reply.model, "deepseek-chat");
    assert_eq!(reply.text, "Hello from DeepSeek");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_answer_is_trimmed() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion_body("deepseek-chat", "  padded answer \n"));
        })
        .await;

    let provider = DeepSeekProvider::new(
        vendor_config(Some("sk-ds-test"), &server.base_url(), "deepseek-chat"),
        5,
    )
    .unwrap();

    let reply = provider.invoke("Hello", None).await.unwrap();
    assert_eq!(reply.text, "padded answer");
}
