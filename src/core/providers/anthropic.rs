//! Anthropic Messages API adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{HttpTransport, normalize_output};
use super::unified_provider::ProviderError;
use super::ProviderCandidate;
use crate::core::traits::ProviderAdapter;
use crate::core::types::{
    ImageSource, ProviderResult, RequestPayload, RoutedRequest, VisionRequest,
};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const VISION_MAX_TOKENS: u32 = 1024;
pub const TEXT_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: UserContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum UserContent<'a> {
    Text(&'a str),
    Blocks(Vec<InputBlock<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputBlock<'a> {
    Text { text: String },
    Image { source: ImageBlockSource<'a> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ImageBlockSource<'a> {
    Base64 { media_type: &'a str, data: &'a str },
    Url { url: &'a str },
}

#[derive(Debug, Deserialize)]
struct MessagesEnvelope {
    content: Vec<OutputBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Adapter for Anthropic's `/v1/messages`
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    http: HttpTransport,
}

impl AnthropicAdapter {
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// Request body for `request` addressed to `model`
    pub fn build_request_body(model: &str, request: &RoutedRequest) -> Result<Value, ProviderError> {
        let body = match &request.payload {
            RequestPayload::Vision(vision) => MessagesRequest {
                model,
                max_tokens: VISION_MAX_TOKENS,
                temperature: 0.0,
                system: vision.system(),
                messages: vec![UserMessage {
                    role: "user",
                    content: UserContent::Blocks(vision_blocks(vision)?),
                }],
            },
            RequestPayload::Text(text) => MessagesRequest {
                model,
                max_tokens: TEXT_MAX_TOKENS,
                temperature: 0.0,
                system: None,
                messages: vec![UserMessage {
                    role: "user",
                    content: UserContent::Text(&text.prompt),
                }],
            },
        };

        serde_json::to_value(&body)
            .map_err(|e| ProviderError::invalid_request("anthropic", e.to_string()))
    }
}

fn vision_blocks(vision: &VisionRequest) -> Result<Vec<InputBlock<'_>>, ProviderError> {
    let source = vision
        .image
        .source()
        .map_err(|e| ProviderError::invalid_request("anthropic", e.to_string()))?;

    let mut blocks = Vec::with_capacity(3);
    if let Some(user) = vision.user() {
        blocks.push(InputBlock::Text {
            text: user.to_string(),
        });
    }
    // The tags line is sent even when empty
    blocks.push(InputBlock::Text {
        text: vision.tags_line(),
    });

    let image_source = match source {
        ImageSource::Inline { .. } => ImageBlockSource::Base64 {
            media_type: source.media_type(),
            data: source.base64_data().unwrap_or_default(),
        },
        ImageSource::Remote { url, .. } => ImageBlockSource::Url { url },
    };
    blocks.push(InputBlock::Image {
        source: image_source,
    });
    Ok(blocks)
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn call(
        &self,
        candidate: &ProviderCandidate,
        api_key: &str,
        request: &RoutedRequest,
    ) -> Result<ProviderResult, ProviderError> {
        let provider = candidate.provider.as_str();
        let body = Self::build_request_body(&candidate.model, request)?;

        let builder = self
            .http
            .client()
            .post(candidate.resolved_endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);

        let envelope: MessagesEnvelope = self
            .http
            .send_json(provider, &candidate.model, builder, &body)
            .await?;

        let text = envelope
            .content
            .into_iter()
            .find_map(|block| match block {
                OutputBlock::Text { text } => Some(text),
                OutputBlock::Other => None,
            })
            .ok_or_else(|| ProviderError::response_parsing(provider, "response has no text block"))?;

        normalize_output(provider, request.kind, text)
    }
}
