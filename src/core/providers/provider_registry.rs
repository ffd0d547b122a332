//! Provider Registry
//!
//! Maps each provider to the adapter that speaks its wire format

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AnthropicAdapter, GeminiAdapter, HttpTransport, OpenAICompatAdapter, ProviderAdapter,
    ProviderKind,
};

/// Registry of adapters keyed by provider
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderKind, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in adapter for every supported provider
    pub fn with_default_adapters(http: HttpTransport) -> Self {
        let openai_compat: Arc<dyn ProviderAdapter> =
            Arc::new(OpenAICompatAdapter::new(http.clone()));

        let mut registry = Self::new();
        registry.register(ProviderKind::OpenAI, openai_compat.clone());
        registry.register(ProviderKind::XAI, openai_compat);
        registry.register(ProviderKind::Anthropic, Arc::new(AnthropicAdapter::new(http.clone())));
        registry.register(ProviderKind::Gemini, Arc::new(GeminiAdapter::new(http)));
        registry
    }

    /// Register or replace the adapter for `provider`
    pub fn register(&mut self, provider: ProviderKind, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(provider, adapter);
    }

    pub fn get(&self, provider: ProviderKind) -> Option<&Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider)
    }

    pub fn contains(&self, provider: ProviderKind) -> bool {
        self.adapters.contains_key(&provider)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<_> = self.adapters.keys().map(ProviderKind::as_str).collect();
        providers.sort_unstable();
        f.debug_struct("ProviderRegistry")
            .field("provider_count", &self.adapters.len())
            .field("providers", &providers)
            .finish()
    }
}
