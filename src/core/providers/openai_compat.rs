//! OpenAI-compatible chat completions adapter
//!
//! Serves both OpenAI and xAI, which accept the same `/v1/chat/completions`
//! envelope and bearer-token auth.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{HttpTransport, normalize_output};
use super::unified_provider::ProviderError;
use super::ProviderCandidate;
use crate::core::traits::ProviderAdapter;
use crate::core::types::{ProviderResult, RequestPayload, RoutedRequest, VisionRequest};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: String },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionEnvelope {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: AssistantContent,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssistantContent {
    Text(String),
    Parts(Vec<AssistantPart>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssistantPart {
    Text(String),
    Object {
        #[serde(default)]
        text: Option<String>,
    },
}

impl AssistantContent {
    fn into_text(self) -> String {
        match self {
            AssistantContent::Text(text) => text,
            AssistantContent::Parts(parts) => parts
                .into_iter()
                .filter_map(|part| match part {
                    AssistantPart::Text(text) => Some(text),
                    AssistantPart::Object { text } => text,
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Adapter for OpenAI and xAI
#[derive(Debug, Clone)]
pub struct OpenAICompatAdapter {
    http: HttpTransport,
}

impl OpenAICompatAdapter {
    pub fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    /// Request body for `request` addressed to `model`
    pub fn build_request_body(
        provider: &'static str,
        model: &str,
        request: &RoutedRequest,
    ) -> Result<Value, ProviderError> {
        let messages = match &request.payload {
            RequestPayload::Vision(vision) => vision_messages(provider, vision)?,
            RequestPayload::Text(text) => vec![ChatMessage {
                role: "user",
                content: MessageContent::Text(&text.prompt),
            }],
        };

        let body = ChatCompletionRequest {
            model,
            messages,
            temperature: 0.0,
            response_format: ResponseFormat { kind: "text" },
        };

        serde_json::to_value(&body)
            .map_err(|e| ProviderError::invalid_request(provider, e.to_string()))
    }
}

fn vision_messages<'a>(
    provider: &'static str,
    vision: &'a VisionRequest,
) -> Result<Vec<ChatMessage<'a>>, ProviderError> {
    let source = vision
        .image
        .source()
        .map_err(|e| ProviderError::invalid_request(provider, e.to_string()))?;

    let mut parts = Vec::with_capacity(3);
    if let Some(user) = vision.user() {
        parts.push(ContentPart::Text {
            text: user.to_string(),
        });
    }
    if !vision.tags.is_empty() {
        parts.push(ContentPart::Text {
            text: vision.tags_line(),
        });
    }
    parts.push(ContentPart::ImageUrl {
        image_url: ImageUrl {
            url: source.as_url(),
        },
    });

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = vision.system() {
        messages.push(ChatMessage {
            role: "system",
            content: MessageContent::Text(system),
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: MessageContent::Parts(parts),
    });
    Ok(messages)
}

#[async_trait]
impl ProviderAdapter for OpenAICompatAdapter {
    fn name(&self) -> &'static str {
        "openai_compatible"
    }

    async fn call(
        &self,
        candidate: &ProviderCandidate,
        api_key: &str,
        request: &RoutedRequest,
    ) -> Result<ProviderResult, ProviderError> {
        let provider = candidate.provider.as_str();
        let body = Self::build_request_body(provider, &candidate.model, request)?;

        let builder = self
            .http
            .client()
            .post(candidate.resolved_endpoint())
            .bearer_auth(api_key);

        let envelope: ChatCompletionEnvelope = self
            .http
            .send_json(provider, &candidate.model, builder, &body)
            .await?;

        let choice = envelope
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::response_parsing(provider, "response has no choices"))?;

        normalize_output(provider, request.kind, choice.message.content.into_text())
    }
}
