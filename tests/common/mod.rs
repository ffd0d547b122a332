//! Common test utilities
//!
//! Mock vendor responses and a configuration whose every candidate points at
//! one `wiremock` server.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use surface_router::config::{CandidateConfig, Config};
use surface_router::core::providers::{
    HttpTransport, ProviderKeys, ProviderKind, ProviderRegistry,
};
use surface_router::core::router::{PriorityTable, Router};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Per-call deadline used by mock-backed transports
pub const TEST_TIMEOUT: Duration = Duration::from_millis(1500);

pub const OPENAI_PATH: &str = "/v1/chat/completions";
pub const ANTHROPIC_PATH: &str = "/v1/messages";

pub fn gemini_path(model: &str) -> String {
    format!("/v1beta/models/{}:generateContent", model)
}

/// OpenAI-compatible chat completion carrying `content`
pub fn openai_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
}

/// Anthropic Messages response carrying `text`
pub fn anthropic_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    }))
}

/// Gemini generateContent response with one part per entry of `parts`
pub fn gemini_reply(parts: &[&str]) -> ResponseTemplate {
    let parts: Vec<_> = parts.iter().map(|p| json!({"text": p})).collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"role": "model", "parts": parts}}]
    }))
}

/// Vendor error with an OpenAI-style body
pub fn error_reply(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"error": {"message": message}}))
}

/// Mount `template` for OpenAI-compatible calls naming `model`
pub async fn mount_chat(server: &MockServer, model: &str, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .and(body_partial_json(json!({"model": model})))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Configuration with every text candidate and the vision family bound to `server`
pub fn mock_config(server: &MockServer) -> Config {
    let base = server.uri();
    let mut config = Config::default();

    config.router.request_timeout_ms = TEST_TIMEOUT.as_millis() as u64;
    config.router.vision_base_url = Some(base.clone());
    config.router.text_candidates = [
        (ProviderKind::OpenAI, "gpt-5"),
        (ProviderKind::XAI, "grok-4"),
        (ProviderKind::Gemini, "gemini-2.5-pro"),
        (ProviderKind::Anthropic, "claude-3-opus-20240229"),
    ]
    .into_iter()
    .map(|(provider, model)| CandidateConfig {
        provider,
        model: model.to_string(),
        endpoint: Some(provider.endpoint_for_base(&base)),
    })
    .collect();

    config
}

pub fn transport() -> HttpTransport {
    HttpTransport::new(TEST_TIMEOUT).expect("http client")
}

/// Router over the real adapters plus the table for `config`
pub fn live_router(config: &Config) -> (Router, PriorityTable) {
    let registry = ProviderRegistry::with_default_adapters(transport());
    (
        Router::new(Arc::new(registry)),
        PriorityTable::from_settings(&config.router),
    )
}

/// A key for every provider
pub fn all_keys() -> ProviderKeys {
    ProviderKind::ALL
        .into_iter()
        .fold(ProviderKeys::new(), |keys, kind| {
            keys.with_key(kind, format!("{}-key", kind))
        })
}

/// Small inline PNG as a data URL
pub fn png_data_url() -> String {
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==".to_string()
}
