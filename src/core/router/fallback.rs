//! Execution result metadata

use crate::core::providers::ProviderCandidate;
use crate::core::types::ProviderResult;

/// Successful routing outcome
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Normalized provider output
    pub result: ProviderResult,
    /// Candidate that produced the result
    pub candidate: ProviderCandidate,
    /// Invoked candidates including the successful one (skips excluded)
    pub attempts: u32,
    /// Whether the winner was not the first candidate in the list
    pub used_fallback: bool,
    /// Total routing latency in microseconds
    pub latency_us: u64,
}
