//! Gemini generateContent adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{HttpTransport, normalize_output};
use super::unified_provider::ProviderError;
use super::ProviderCandidate;
use crate::core::traits::ProviderAdapter;
use crate::core::types::{ImageSource, ProviderResult, RequestPayload, RoutedRequest};

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Part<'a> {
    Text(String),
    InlineData { mime_type: &'a str, data: &'a str },
    FileData { mime_type: &'a str, file_uri: &'a str },
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentEnvelope {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Adapter for Gemini's `models/{model}:generateContent`
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    http: HttpTransport,
}

impl GeminiAdapter {
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// Request body for `request`
    pub fn build_request_body(request: &RoutedRequest) -> Result<Value, ProviderError> {
        let body = match &request.payload {
            RequestPayload::Vision(vision) => {
                let source = vision
                    .image
                    .source()
                    .map_err(|e| ProviderError::invalid_request("gemini", e.to_string()))?;

                let mut parts = Vec::with_capacity(3);
                if let Some(user) = vision.user() {
                    parts.push(Part::Text(user.to_string()));
                }
                if !vision.tags.is_empty() {
                    parts.push(Part::Text(vision.tags_line()));
                }
                parts.push(match source {
                    ImageSource::Inline { .. } => Part::InlineData {
                        mime_type: source.media_type(),
                        data: source.base64_data().unwrap_or_default(),
                    },
                    ImageSource::Remote { url, .. } => Part::FileData {
                        mime_type: source.media_type(),
                        file_uri: url,
                    },
                });

                GenerateContentRequest {
                    contents: vec![Content {
                        role: Some("user"),
                        parts,
                    }],
                    system_instruction: vision.system().map(|system| Content {
                        role: None,
                        parts: vec![Part::Text(system.to_string())],
                    }),
                    generation_config: GenerationConfig { temperature: 0.0 },
                }
            }
            RequestPayload::Text(text) => GenerateContentRequest {
                contents: vec![Content {
                    role: Some("user"),
                    parts: vec![Part::Text(text.prompt.clone())],
                }],
                system_instruction: None,
                generation_config: GenerationConfig { temperature: 0.0 },
            },
        };

        serde_json::to_value(&body).map_err(|e| ProviderError::invalid_request("gemini", e.to_string()))
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn call(
        &self,
        candidate: &ProviderCandidate,
        api_key: &str,
        request: &RoutedRequest,
    ) -> Result<ProviderResult, ProviderError> {
        let provider = candidate.provider.as_str();
        let body = Self::build_request_body(request)?;

        let builder = self
            .http
            .client()
            .post(candidate.resolved_endpoint())
            .query(&[("key", api_key)]);

        let envelope: GenerateContentEnvelope = self
            .http
            .send_json(provider, &candidate.model, builder, &body)
            .await?;

        let first = envelope
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::response_parsing(provider, "response has no candidates"))?;

        let texts: Vec<String> = first
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if texts.is_empty() {
            return Err(ProviderError::response_parsing(provider, "candidate has no text parts"));
        }

        normalize_output(provider, request.kind, texts.concat())
    }
}
