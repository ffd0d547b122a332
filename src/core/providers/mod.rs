//! Provider adapters and the candidate types the router walks
//!
//! Three wire formats cover the four supported vendors: OpenAI and xAI share
//! the chat-completions envelope, Anthropic and Gemini each have their own.

pub mod anthropic;
pub mod base;
pub mod gemini;
pub mod openai_compat;
pub mod provider_registry;
pub mod unified_provider;

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::core::traits::{ApiKeyLookup, ProviderAdapter};
pub use anthropic::AnthropicAdapter;
pub use base::HttpTransport;
pub use gemini::GeminiAdapter;
pub use openai_compat::OpenAICompatAdapter;
pub use provider_registry::ProviderRegistry;
pub use unified_provider::ProviderError;

/// Supported vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "xai", alias = "grok")]
    XAI,
    #[serde(rename = "gemini", alias = "google")]
    Gemini,
    #[serde(rename = "anthropic", alias = "claude")]
    Anthropic,
}

/// Request/response envelope a vendor speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    OpenAICompatible,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAI,
        ProviderKind::XAI,
        ProviderKind::Gemini,
        ProviderKind::Anthropic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::XAI => "xai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    pub fn wire_format(&self) -> WireFormat {
        match self {
            ProviderKind::OpenAI | ProviderKind::XAI => WireFormat::OpenAICompatible,
            ProviderKind::Anthropic => WireFormat::Anthropic,
            ProviderKind::Gemini => WireFormat::Gemini,
        }
    }

    /// Prefix of the `<FAMILY>_VISION_MODELS` style environment variables
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI",
            ProviderKind::XAI => "XAI",
            ProviderKind::Gemini => "GEMINI",
            ProviderKind::Anthropic => "ANTHROPIC",
        }
    }

    /// Vendor API root
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "https://api.openai.com",
            ProviderKind::XAI => "https://api.x.ai",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Full endpoint under the given base URL
    ///
    /// Gemini endpoints keep a `{model}` placeholder that the adapter fills.
    pub fn endpoint_for_base(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self.wire_format() {
            WireFormat::OpenAICompatible => format!("{}/v1/chat/completions", base),
            WireFormat::Anthropic => format!("{}/v1/messages", base),
            WireFormat::Gemini => format!("{}/v1beta/models/{{model}}:generateContent", base),
        }
    }

    pub fn default_endpoint(&self) -> String {
        self.endpoint_for_base(self.default_base_url())
    }

    /// Vision models tried when no override is configured
    pub fn default_vision_models(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::XAI => &["grok-3", "grok-3-mini", "grok-2-vision", "grok-1.5v"],
            ProviderKind::OpenAI => &["gpt-4o", "gpt-4o-mini"],
            ProviderKind::Gemini => &["gemini-2.5-pro", "gemini-2.5-flash"],
            ProviderKind::Anthropic => &["claude-3-opus-20240229"],
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "xai" | "grok" => Ok(ProviderKind::XAI),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// One `(provider, model, endpoint)` entry of a priority list
///
/// Identity is `(provider, model)`; the endpoint is routing detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCandidate {
    pub provider: ProviderKind,
    pub model: String,
    pub endpoint: String,
}

impl ProviderCandidate {
    pub fn new(provider: ProviderKind, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Candidate at the vendor's public endpoint
    pub fn with_default_endpoint(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self::new(provider, model, provider.default_endpoint())
    }

    /// Endpoint with any `{model}` placeholder filled in
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint.replace("{model}", &self.model)
    }

    /// `provider/model`, used in logs and error summaries
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

impl PartialEq for ProviderCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider && self.model == other.model
    }
}

impl Eq for ProviderCandidate {}

impl Hash for ProviderCandidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.model.hash(state);
    }
}

/// Per-request API keys by provider
///
/// Deserializes from `{"openai": "...", "grok": "...", ...}`. Keys never
/// appear in `Debug` output.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ProviderKeys {
    keys: HashMap<ProviderKind, String>,
}

impl ProviderKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        self.keys.insert(provider, key.into());
        self
    }

    /// Bind the request's primary `apiKey` to a family
    ///
    /// A blank primary key leaves any key already present untouched.
    pub fn with_primary(mut self, provider: ProviderKind, api_key: &str) -> Self {
        if !api_key.trim().is_empty() {
            self.keys.insert(provider, api_key.trim().to_string());
        }
        self
    }

    /// Providers holding a non-blank key
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.api_key(*kind).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.configured().is_empty()
    }
}

impl ApiKeyLookup for ProviderKeys {
    fn api_key(&self, provider: ProviderKind) -> Option<&str> {
        self.keys
            .get(&provider)
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
    }
}

impl fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderKeys")
            .field("configured", &self.configured())
            .finish()
    }
}
