//! Inbound single-task request accepted at the HTTP boundary

use serde::Deserialize;

use super::payload::{ImageRef, InvalidPayload, RequestPayload, TextRequest, VisionRequest};
use super::task::{RoutedRequest, TaskKind};
use crate::core::providers::{ProviderKeys, ProviderKind};

/// Wire shape of a routed task
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundTask {
    pub task_kind: TaskKind,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub preferred_model: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub provider_keys: ProviderKeys,
}

impl InboundTask {
    /// Build the routed request, rejecting payloads that do not fit the task
    pub fn to_routed(&self) -> Result<RoutedRequest, InvalidPayload> {
        let payload = if self.task_kind.is_vision() {
            let image = self.image.clone().ok_or_else(|| {
                InvalidPayload::new(format!("{} requires an image", self.task_kind))
            })?;
            RequestPayload::Vision(VisionRequest {
                image,
                tags: self.tags.clone(),
                system_prompt: self.system_prompt.clone(),
                user_text: self.user_text.clone(),
            })
        } else {
            let prompt = self.prompt.clone().ok_or_else(|| {
                InvalidPayload::new(format!("{} requires a prompt", self.task_kind))
            })?;
            RequestPayload::Text(TextRequest::new(prompt))
        };

        let request = RoutedRequest {
            kind: self.task_kind,
            payload,
        };
        request.validate()?;
        Ok(request)
    }

    /// Keys for this request, with `apiKey` bound to the given family
    pub fn keys(&self, primary: ProviderKind) -> ProviderKeys {
        self.provider_keys.clone().with_primary(primary, &self.api_key)
    }
}
