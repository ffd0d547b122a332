//! In-process adapter that replays scripted replies

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::providers::base::normalize_output;
use crate::core::providers::{
    ProviderCandidate, ProviderError, ProviderKeys, ProviderKind, ProviderRegistry,
};
use crate::core::router::Router;
use crate::core::traits::ProviderAdapter;
use crate::core::types::{ProviderResult, RoutedRequest, TaskKind};

/// One observed adapter call
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub provider: ProviderKind,
    pub model: String,
    pub endpoint: String,
    pub kind: TaskKind,
    pub api_key: String,
}

/// Replays replies in call order; fails with a network error once exhausted
///
/// Successful replies go through the same output normalization as the real
/// adapters, so non-JSON text for a structured task is `MalformedOutput`.
#[derive(Debug, Default)]
pub(crate) struct ScriptedAdapter {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_ok(&self, text: impl Into<String>) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn reply_err(&self, error: ProviderError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_labels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| format!("{}/{}", c.provider, c.model))
            .collect()
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn call(
        &self,
        candidate: &ProviderCandidate,
        api_key: &str,
        request: &RoutedRequest,
    ) -> Result<ProviderResult, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            provider: candidate.provider,
            model: candidate.model.clone(),
            endpoint: candidate.resolved_endpoint(),
            kind: request.kind,
            api_key: api_key.to_string(),
        });

        let provider = candidate.provider.as_str();
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::network(provider, "script exhausted")));

        normalize_output(provider, request.kind, reply?)
    }
}

/// Router with `adapter` registered for every provider
pub(crate) fn scripted_router(adapter: &Arc<ScriptedAdapter>) -> Router {
    let mut registry = ProviderRegistry::new();
    for kind in ProviderKind::ALL {
        registry.register(kind, adapter.clone());
    }
    Router::new(Arc::new(registry))
}

/// Keys for every provider
pub(crate) fn all_keys() -> ProviderKeys {
    ProviderKind::ALL
        .into_iter()
        .fold(ProviderKeys::new(), |keys, kind| {
            keys.with_key(kind, format!("{}-key", kind))
        })
}

pub(crate) fn candidate(provider: ProviderKind, model: &str) -> ProviderCandidate {
    ProviderCandidate::with_default_endpoint(provider, model)
}
