//! Component generation helpers
//!
//! - `prompt` - prompt text for the external component generator
//! - `lint` - line-based checks on generated component code
//!
//! [`generate_files`] runs a generate-files task through the router and
//! returns the produced files.

pub mod lint;
pub mod prompt;

pub use lint::{Violation, ViolationKind, check_module_shape, lint_component, validate_component};
pub use prompt::{GenerationBrief, build_generation_prompt, normalize_negatives};

use tracing::info;

use crate::core::providers::ProviderCandidate;
use crate::core::router::{Router, RouterError};
use crate::core::traits::ApiKeyLookup;
use crate::core::types::{GeneratedFile, RoutedRequest, files_from_value};

/// Route a generate-files prompt and return the files of the first valid reply
///
/// Candidates whose reply lacks a well-formed `files` array have already
/// been failed over by the adapters.
pub async fn generate_files(
    router: &Router,
    candidates: &[ProviderCandidate],
    keys: &dyn ApiKeyLookup,
    prompt: impl Into<String>,
) -> Result<Vec<GeneratedFile>, RouterError> {
    let request = RoutedRequest::generate_files(prompt);
    let execution = router.route(&request, candidates, keys).await?;

    let files = files_from_value(&execution.result.into_value()).unwrap_or_default();
    info!(
        provider = %execution.candidate.provider,
        model = %execution.candidate.model,
        files = files.len(),
        "generated files"
    );
    Ok(files)
}
