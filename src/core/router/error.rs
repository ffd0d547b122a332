//! Router error types

use crate::core::providers::{ProviderCandidate, ProviderError};
use crate::core::types::{InvalidPayload, TaskKind};

/// One invoked candidate and why it failed
#[derive(Debug, Clone, PartialEq)]
pub struct FailedAttempt {
    pub candidate: ProviderCandidate,
    pub error: ProviderError,
}

/// Router error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouterError {
    /// Payload rejected before any provider was called
    #[error(transparent)]
    InvalidPayload(#[from] InvalidPayload),

    /// Every candidate was skipped or failed
    ///
    /// `attempts` holds one entry per invoked candidate, in call order.
    #[error("All providers failed for {task}: {}", summarize(.attempts, .skipped))]
    AllProvidersFailed {
        task: TaskKind,
        attempts: Vec<FailedAttempt>,
        skipped: Vec<ProviderCandidate>,
    },
}

impl RouterError {
    /// Failed attempts, empty for payload errors
    pub fn attempts(&self) -> &[FailedAttempt] {
        match self {
            RouterError::AllProvidersFailed { attempts, .. } => attempts,
            RouterError::InvalidPayload(_) => &[],
        }
    }

    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, RouterError::InvalidPayload(_))
    }
}

fn summarize(attempts: &[FailedAttempt], skipped: &[ProviderCandidate]) -> String {
    let mut parts = Vec::with_capacity(2);
    if !attempts.is_empty() {
        let tried: Vec<String> = attempts
            .iter()
            .map(|a| format!("{} ({})", a.candidate.label(), a.error))
            .collect();
        parts.push(format!("tried {}", tried.join("; ")));
    }
    if !skipped.is_empty() {
        let labels: Vec<String> = skipped.iter().map(ProviderCandidate::label).collect();
        parts.push(format!("skipped without API key {}", labels.join(", ")));
    }
    if parts.is_empty() {
        return "no candidates".to_string();
    }
    parts.join("; ")
}
