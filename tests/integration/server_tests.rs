//! HTTP surface tests

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};
use surface_router::server::{AppState, create_app};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer};

use crate::common::{error_reply, mock_config, mount_chat, openai_reply, png_data_url};

fn state(server: &MockServer) -> web::Data<AppState> {
    web::Data::new(AppState::new(mock_config(server)).expect("app state"))
}

fn image(id: &str) -> Value {
    json!({"id": id, "mime": "image/png", "blobBase64": png_data_url(), "tags": ["blue", "button"]})
}

#[actix_web::test]
async fn test_health() {
    let server = MockServer::start().await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_analyze_requires_key() {
    let server = MockServer::start().await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/analyze")
        .set_json(json!({"images": [image("img1")], "apiKey": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_analyze_rejects_too_many_images() {
    let server = MockServer::start().await;
    let app = test::init_service(create_app(state(&server))).await;

    let images: Vec<Value> = (0..6).map(|i| image(&format!("img{i}"))).collect();
    let req = test::TestRequest::post()
        .uri("/api/analyze")
        .set_json(json!({"images": images, "apiKey": "xai-key"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_analyze_rejects_image_without_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(openai_reply("unused"))
        .expect(0)
        .mount(&server)
        .await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/analyze")
        .set_json(json!({
            "images": [image("img1"), {"id": "img2", "mime": "image/png"}],
            "apiKey": "xai-key"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "INVALID_PAYLOAD");
}

#[actix_web::test]
async fn test_analyze_degrades_to_stub() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(error_reply(500, "down"))
        .mount(&server)
        .await;
    let app = test::init_service(create_app(state(&server))).await;

    let mut first = image("img1");
    first["description"] = json!("submit button");
    let req = test::TestRequest::post()
        .uri("/api/analyze")
        .set_json(json!({"images": [first], "apiKey": "xai-key"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!([{
            "imageId": "img1",
            "tags": ["blue", "button"],
            "microdesc": "submit button",
            "surfaceLayers": {}
        }])
    );
}

#[actix_web::test]
async fn test_route_compose() {
    let server = MockServer::start().await;
    mount_chat(&server, "gpt-5", error_reply(500, "down")).await;
    mount_chat(&server, "grok-4", openai_reply("hello")).await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/route")
        .set_json(json!({
            "taskKind": "compose",
            "prompt": "say hello",
            "apiKey": "xai-key",
            "providerKeys": {"openai": "o-key"}
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({
            "result": "hello",
            "provider": "xai",
            "model": "grok-4",
            "attempts": 2,
            "usedFallback": true
        })
    );
}

#[actix_web::test]
async fn test_route_exhaustion_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(error_reply(503, "down"))
        .mount(&server)
        .await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/route")
        .set_json(json!({"taskKind": "compose", "prompt": "hi", "apiKey": "xai-key"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "ALL_PROVIDERS_FAILED");
    assert!(body["error"]["message"].as_str().unwrap().contains("xai/grok-4"));
}

#[actix_web::test]
async fn test_route_vision_without_image() {
    let server = MockServer::start().await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/route")
        .set_json(json!({"taskKind": "visionDescribe", "apiKey": "xai-key"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let server = MockServer::start().await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/route")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_generation_prompt_and_lint() {
    let server = MockServer::start().await;
    let app = test::init_service(create_app(state(&server))).await;

    let req = test::TestRequest::post()
        .uri("/api/generate/prompt")
        .set_json(json!({"userPrompt": "a button", "analyses": []}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/generate/prompt")
        .set_json(json!({
            "componentName": "Cta",
            "userPrompt": "a #blue button",
            "negatives": ["No-Shadows"],
            "analyses": [{"imageId": "img1", "tags": [], "microdesc": "pill", "surfaceLayers": {}}]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["negatives"], json!(["no-shadow"]));
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Component name: Cta. App: App."));
    assert!(prompt.contains("- img1 microdesc=\"pill\" layers={}"));

    let req = test::TestRequest::post()
        .uri("/api/generate/lint")
        .set_json(json!({"code": "export default () => <img src=\"a.png\" />"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["valid"], false);
    let kinds: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["missing-dimensions", "missing-imports"]);
}
