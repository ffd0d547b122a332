//! Fallback routing across the real adapters

use std::time::Duration;

use surface_router::core::providers::{ProviderError, ProviderKeys, ProviderKind};
use surface_router::core::router::RouterError;
use surface_router::core::types::{ImageRef, RoutedRequest, TaskKind, VisionRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

use crate::common::{
    ANTHROPIC_PATH, all_keys, anthropic_reply, error_reply, gemini_path, gemini_reply,
    live_router, mock_config, mount_chat, openai_reply,
};

#[tokio::test]
async fn test_falls_back_across_vendors() {
    let server = MockServer::start().await;
    mount_chat(&server, "gpt-5", error_reply(500, "overloaded")).await;
    mount_chat(&server, "grok-4", openai_reply("from grok")).await;
    Mock::given(method("POST"))
        .and(path(gemini_path("gemini-2.5-pro")))
        .respond_with(gemini_reply(&["unused"]))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::Compose, None, None);

    let execution = router
        .route(&RoutedRequest::compose("describe"), &candidates, &all_keys())
        .await
        .unwrap();

    assert_eq!(execution.result.as_text(), Some("from grok"));
    assert_eq!(execution.candidate.label(), "xai/grok-4");
    assert_eq!(execution.attempts, 2);
    assert!(execution.used_fallback);
}

#[tokio::test]
async fn test_exhaustion_records_every_attempt_in_order() {
    let server = MockServer::start().await;
    mount_chat(&server, "gpt-5", error_reply(401, "bad key")).await;
    mount_chat(&server, "grok-4", error_reply(429, "slow down")).await;
    Mock::given(method("POST"))
        .and(path(gemini_path("gemini-2.5-pro")))
        .respond_with(error_reply(503, "unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ANTHROPIC_PATH))
        .respond_with(error_reply(400, "bad request"))
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::Compose, None, None);

    let err = router
        .route(&RoutedRequest::compose("describe"), &candidates, &all_keys())
        .await
        .unwrap_err();

    let labels: Vec<String> = err.attempts().iter().map(|a| a.candidate.label()).collect();
    assert_eq!(
        labels,
        vec![
            "openai/gpt-5",
            "xai/grok-4",
            "gemini/gemini-2.5-pro",
            "anthropic/claude-3-opus-20240229"
        ]
    );
    let statuses: Vec<Option<u16>> = err.attempts().iter().map(|a| a.error.status()).collect();
    assert_eq!(statuses, vec![Some(401), Some(429), Some(503), Some(400)]);
    assert!(matches!(err, RouterError::AllProvidersFailed { task: TaskKind::Compose, .. }));
}

#[tokio::test]
async fn test_unkeyed_candidates_are_never_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(openai_reply("should not be called"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ANTHROPIC_PATH))
        .respond_with(anthropic_reply("from claude"))
        .expect(1)
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::Compose, None, None);
    let keys = ProviderKeys::new().with_key(ProviderKind::Anthropic, "a-key");

    let execution = router
        .route(&RoutedRequest::compose("describe"), &candidates, &keys)
        .await
        .unwrap();

    assert_eq!(execution.result.as_text(), Some("from claude"));
    assert_eq!(execution.attempts, 1);
    assert!(execution.used_fallback);
}

#[tokio::test]
async fn test_timeout_advances_to_next_candidate() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        "gpt-5",
        openai_reply("too late").set_delay(Duration::from_secs(4)),
    )
    .await;
    mount_chat(&server, "grok-4", openai_reply("in time")).await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::Compose, None, None);

    let execution = router
        .route(&RoutedRequest::compose("describe"), &candidates, &all_keys())
        .await
        .unwrap();

    assert_eq!(execution.result.as_text(), Some("in time"));
    assert_eq!(execution.attempts, 2);
}

#[tokio::test]
async fn test_vision_models_fall_back_in_order() {
    let server = MockServer::start().await;
    mount_chat(&server, "grok-3", error_reply(429, "busy")).await;
    mount_chat(&server, "grok-3-mini", openai_reply("glossy red")).await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::VisionDescribe, None, None);
    let request = RoutedRequest::vision_describe(VisionRequest::new(ImageRef::remote(
        "image/png",
        "https://cdn.example.com/a.png",
    )));

    let execution = router
        .route(&request, &candidates, &all_keys())
        .await
        .unwrap();

    assert_eq!(execution.candidate.model, "grok-3-mini");
    assert_eq!(execution.result.as_text(), Some("glossy red"));
}

#[tokio::test]
async fn test_invalid_payload_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(openai_reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::VisionDescribe, None, None);
    let request = RoutedRequest::vision_describe(VisionRequest::new(ImageRef {
        mime: "image/png".to_string(),
        data_url: None,
        url: None,
    }));

    let err = router
        .route(&request, &candidates, &all_keys())
        .await
        .unwrap_err();
    assert!(err.is_invalid_payload());
    assert!(err.attempts().is_empty());
}

#[tokio::test]
async fn test_malformed_structured_output_advances() {
    let server = MockServer::start().await;
    mount_chat(&server, "gpt-5", openai_reply("```json\n{\"files\": []}\n```")).await;
    mount_chat(
        &server,
        "grok-4",
        openai_reply(r#"{"files": [{"path": "component.tsx", "contents": "export default 1"}]}"#),
    )
    .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::GenerateFiles, None, None);

    let files = surface_router::core::generation::generate_files(
        &router,
        &candidates,
        &all_keys(),
        "build a button",
    )
    .await
    .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "component.tsx");
}

#[tokio::test]
async fn test_failed_attempt_keeps_vendor_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(error_reply(500, "boom"))
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let candidates = table.candidates_for(TaskKind::Compose, None, None);
    let keys = ProviderKeys::new().with_key(ProviderKind::OpenAI, "o-key");

    let err = router
        .route(&RoutedRequest::compose("describe"), &candidates, &keys)
        .await
        .unwrap_err();

    assert_eq!(err.attempts().len(), 1);
    assert!(matches!(
        err.attempts()[0].error,
        ProviderError::ApiError { provider: "openai", status: 500, .. }
    ));
    assert!(err.to_string().contains("skipped without API key"));
}
