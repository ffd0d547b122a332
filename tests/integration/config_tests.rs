//! Configuration loading from files and the environment

use std::collections::HashMap;
use std::io::Write;

use surface_router::config::{Config, Validate};
use surface_router::core::providers::ProviderKind;
use tempfile::NamedTempFile;

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_from_file_with_partial_yaml() {
    let file = yaml_file(
        r#"
server:
  port: 9100
  max_images: 3
router:
  vision_models: [grok-2-vision]
  text_candidates:
    - provider: anthropic
      model: claude-3-opus-20240229
logging:
  json: true
"#,
    );

    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.max_images, 3);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.router.effective_vision_models(), vec!["grok-2-vision"]);
    assert_eq!(config.router.text_candidates.len(), 1);
    assert_eq!(config.router.text_candidates[0].provider, ProviderKind::Anthropic);
    assert!(config.logging.json);
}

#[tokio::test]
async fn test_from_file_rejects_invalid_values() {
    let file = yaml_file("router:\n  request_timeout_ms: 0\n");
    assert!(Config::from_file(file.path()).await.is_err());

    let file = yaml_file(
        "router:\n  text_candidates:\n    - provider: openai\n      model: gpt-5\n      endpoint: \"ftp://example.com\"\n",
    );
    assert!(Config::from_file(file.path()).await.is_err());
}

#[tokio::test]
async fn test_from_file_rejects_unknown_provider() {
    let file = yaml_file("router:\n  vision_family: mistral\n");
    assert!(Config::from_file(file.path()).await.is_err());
}

#[tokio::test]
async fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path().join("absent.yaml")).await.unwrap();

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.router.vision_family, ProviderKind::XAI);
    assert!(config.router.validate().is_ok());
}

#[test]
fn test_env_overrides_layer_on_file() {
    let mut config = Config::from_yaml("server:\n  port: 9100\n").unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        ("GATEWAY_PORT", "9200"),
        ("AI_TIMEOUT_MS", "5000"),
        ("API_BODY_SIZE", "10mb"),
        ("XAI_VISION_MODELS", "grok-3, grok-2-vision"),
        ("XAI_API_BASE_URL", "http://localhost:5000"),
    ]);

    config
        .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.server.port, 9200);
    assert_eq!(config.router.request_timeout_ms, 5000);
    assert_eq!(config.server.max_body_size, 10 * 1024 * 1024);
    assert_eq!(
        config.router.effective_vision_models(),
        vec!["grok-3", "grok-2-vision"]
    );
    assert_eq!(
        config.router.vision_base_url.as_deref(),
        Some("http://localhost:5000")
    );
    assert!(config.validate().is_ok());
}
