//! Router configuration
//!
//! The priority tables live here so they are fixed at process start and handed
//! to the router by reference.

use super::*;
use crate::core::providers::{ProviderCandidate, ProviderKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Router settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Ordered candidates for text tasks
    #[serde(default = "default_text_candidates")]
    pub text_candidates: Vec<CandidateConfig>,
    /// Provider family used for vision tasks and bound to a request's `apiKey`
    #[serde(default = "default_vision_family")]
    pub vision_family: ProviderKind,
    /// Vision models in priority order; empty means the family defaults
    #[serde(default)]
    pub vision_models: Vec<String>,
    /// Base URL for the vision family when a request does not supply one
    #[serde(default)]
    pub vision_base_url: Option<String>,
    /// Model tried first by the text-only compose fallback
    #[serde(default = "default_compose_fallback_model")]
    pub compose_fallback_model: String,
    /// Per-call provider timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            text_candidates: default_text_candidates(),
            vision_family: default_vision_family(),
            vision_models: Vec::new(),
            vision_base_url: None,
            compose_fallback_model: default_compose_fallback_model(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl RouterSettings {
    /// Vision models after applying any override
    pub fn effective_vision_models(&self) -> Vec<String> {
        if self.vision_models.is_empty() {
            self.vision_family
                .default_vision_models()
                .iter()
                .map(|m| m.to_string())
                .collect()
        } else {
            self.vision_models.clone()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// One configured text candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Overrides the vendor's public endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl CandidateConfig {
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            endpoint: None,
        }
    }

    pub fn to_candidate(&self) -> ProviderCandidate {
        match &self.endpoint {
            Some(endpoint) => ProviderCandidate::new(self.provider, &self.model, endpoint),
            None => ProviderCandidate::with_default_endpoint(self.provider, &self.model),
        }
    }
}

/// Split a comma-separated model list, dropping blanks
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_text_candidates() -> Vec<CandidateConfig> {
    vec![
        CandidateConfig::new(ProviderKind::OpenAI, "gpt-5"),
        CandidateConfig::new(ProviderKind::XAI, "grok-4"),
        CandidateConfig::new(ProviderKind::Gemini, "gemini-2.5-pro"),
        CandidateConfig::new(ProviderKind::Anthropic, "claude-3-opus-20240229"),
    ]
}

fn default_vision_family() -> ProviderKind {
    ProviderKind::XAI
}
