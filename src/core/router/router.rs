//! Fallback router
//!
//! Walks an ordered candidate list one call at a time and returns the first
//! success. Candidates without an API key are skipped; every invoked
//! candidate that fails is recorded and the walk advances. There is no retry
//! of the same candidate and no reordering.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::error::{FailedAttempt, RouterError};
use super::fallback::ExecutionResult;
use crate::core::providers::{ProviderCandidate, ProviderError, ProviderRegistry};
use crate::core::traits::ApiKeyLookup;
use crate::core::types::RoutedRequest;

/// Router over a fixed adapter registry
#[derive(Debug, Clone)]
pub struct Router {
    registry: Arc<ProviderRegistry>,
}

impl Router {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Route `request` through `candidates` in order
    pub async fn route(
        &self,
        request: &RoutedRequest,
        candidates: &[ProviderCandidate],
        keys: &dyn ApiKeyLookup,
    ) -> Result<ExecutionResult, RouterError> {
        request.validate()?;

        let start = Instant::now();
        let mut attempts: Vec<FailedAttempt> = Vec::new();
        let mut skipped: Vec<ProviderCandidate> = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let Some(api_key) = keys.api_key(candidate.provider) else {
                debug!(
                    task = %request.kind,
                    provider = %candidate.provider,
                    model = %candidate.model,
                    "skipping candidate without API key"
                );
                skipped.push(candidate.clone());
                continue;
            };

            let attempt = attempts.len() as u32 + 1;
            let call_start = Instant::now();
            let outcome = match self.registry.get(candidate.provider) {
                Some(adapter) => adapter.call(candidate, api_key, request).await,
                None => Err(ProviderError::provider_unavailable(
                    candidate.provider.as_str(),
                    "no adapter registered",
                )),
            };
            let latency_ms = call_start.elapsed().as_millis() as u64;

            match outcome {
                Ok(result) => {
                    info!(
                        task = %request.kind,
                        provider = %candidate.provider,
                        model = %candidate.model,
                        attempt = attempt,
                        latency_ms = latency_ms,
                        outcome = "success",
                        "provider call succeeded"
                    );
                    return Ok(ExecutionResult {
                        result,
                        candidate: candidate.clone(),
                        attempts: attempt,
                        used_fallback: index > 0,
                        latency_us: start.elapsed().as_micros() as u64,
                    });
                }
                Err(error) => {
                    warn!(
                        task = %request.kind,
                        provider = %candidate.provider,
                        model = %candidate.model,
                        attempt = attempt,
                        latency_ms = latency_ms,
                        outcome = "failure",
                        transient = error.is_transient(),
                        error = %error,
                        "provider call failed"
                    );
                    attempts.push(FailedAttempt {
                        candidate: candidate.clone(),
                        error,
                    });
                }
            }
        }

        warn!(
            task = %request.kind,
            attempted = attempts.len(),
            skipped = skipped.len(),
            "all providers failed"
        );
        Err(RouterError::AllProvidersFailed {
            task: request.kind,
            attempts,
            skipped,
        })
    }
}
