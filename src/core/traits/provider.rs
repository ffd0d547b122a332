//! Provider adapter trait
//!
//! Every vendor wire format sits behind one normalized call signature so the
//! router can walk a candidate list without knowing which vendor it is on.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::core::providers::{ProviderCandidate, ProviderError, ProviderKind};
use crate::core::types::{ProviderResult, RoutedRequest};

/// Unified provider adapter interface
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
    /// Adapter name used in logs
    fn name(&self) -> &'static str;

    /// Perform one call against `candidate`
    ///
    /// Fails on non-2xx status, an unexpected response envelope, transport
    /// failure, per-call timeout, or (for structured tasks) text that is not
    /// the expected JSON object.
    async fn call(
        &self,
        candidate: &ProviderCandidate,
        api_key: &str,
        request: &RoutedRequest,
    ) -> Result<ProviderResult, ProviderError>;
}

/// Source of per-request API keys
pub trait ApiKeyLookup: Send + Sync {
    /// Non-blank key for `provider`, if one was supplied
    fn api_key(&self, provider: ProviderKind) -> Option<&str>;
}
