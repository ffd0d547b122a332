//! Recovery pipeline end to end against mock vendors

use serde_json::json;
use surface_router::core::recovery::{AnalysisContext, AnalysisImage, RecoveryPipeline, StageKind};
use surface_router::core::types::ImageRef;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer};

use crate::common::{
    OPENAI_PATH, all_keys, error_reply, live_router, mock_config, mount_chat, openai_reply,
    png_data_url,
};

fn blue_button() -> AnalysisImage {
    AnalysisImage::new("img1", ImageRef::inline("image/png", png_data_url()))
        .with_tags(vec!["blue".to_string(), "button".to_string()])
}

#[tokio::test]
async fn test_every_vendor_down_yields_stub() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(error_reply(500, "down"))
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let keys = all_keys();
    let pipeline = RecoveryPipeline::new(&router, &table);

    let outcomes = pipeline
        .analyze(
            &[blue_button().with_description("submit button")],
            &AnalysisContext::new(&keys),
        )
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&outcomes).unwrap(),
        json!([{
            "imageId": "img1",
            "tags": ["blue", "button"],
            "microdesc": "submit button",
            "surfaceLayers": {}
        }])
    );

    // 4 describe + 4 structured + grok-mini and 4 text candidates
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 13);
}

#[tokio::test]
async fn test_json_from_describe_stops_after_one_call() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        "grok-3",
        openai_reply(r#"{"microdesc": "pill", "surfaceLayers": {"fill": "blue"}}"#),
    )
    .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let keys = all_keys();
    let pipeline = RecoveryPipeline::new(&router, &table);

    let recovery = pipeline
        .recover(&blue_button(), &AnalysisContext::new(&keys))
        .await
        .unwrap();

    assert_eq!(recovery.resolved_by, StageKind::ParseAsJson);
    assert_eq!(recovery.outcome.surface_layers, json!({"fill": "blue"}));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_structured_revision_after_prose() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .respond_with(openai_reply("A glossy blue pill-shaped button."))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_chat(
        &server,
        "grok-3",
        openai_reply(r#"{"imageId": "img1", "surfaceLayers": {"gloss": "high"}}"#),
    )
    .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let keys = all_keys();
    let pipeline = RecoveryPipeline::new(&router, &table);

    let recovery = pipeline
        .recover(&blue_button(), &AnalysisContext::new(&keys))
        .await
        .unwrap();

    assert_eq!(recovery.resolved_by, StageKind::StructuredRevision);
    assert_eq!(recovery.outcome.microdesc, "A glossy blue pill-shaped button.");
    assert_eq!(recovery.outcome.surface_layers, json!({"gloss": "high"}));

    let requests = server.received_requests().await.unwrap();
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let user_parts = second["messages"][1]["content"].as_array().unwrap();
    assert!(
        user_parts[0]["text"]
            .as_str()
            .unwrap()
            .contains("imageId=img1")
    );
}

#[tokio::test]
async fn test_text_only_fallback_through_compose_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OPENAI_PATH))
        .and(body_partial_json(json!({"model": "grok-mini"})))
        .respond_with(openai_reply(r#"{"microdesc": "composed", "surfaceLayers": {"radius": "8px"}}"#))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(error_reply(503, "vision offline"))
        .mount(&server)
        .await;

    let config = mock_config(&server);
    let (router, table) = live_router(&config);
    let keys = all_keys();
    let pipeline = RecoveryPipeline::new(&router, &table);

    let recovery = pipeline
        .recover(
            &blue_button().with_description("submit button"),
            &AnalysisContext::new(&keys),
        )
        .await
        .unwrap();

    assert_eq!(recovery.resolved_by, StageKind::TextOnlyFallback);
    assert_eq!(recovery.outcome.microdesc, "composed");
    assert_eq!(recovery.outcome.surface_layers, json!({"radius": "8px"}));

    let requests = server.received_requests().await.unwrap();
    let last: serde_json::Value = serde_json::from_slice(&requests.last().unwrap().body).unwrap();
    let prompt = last["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("imageId:img1"));
    assert!(prompt.contains("description:submit button"));
}
