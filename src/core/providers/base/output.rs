//! Task-aware normalization of extracted provider text

use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::{ProviderResult, TaskKind, files_from_value, parse_json_object};

/// Turn the text a vendor returned into the result the task expects
///
/// Text tasks pass through. Structured tasks must parse strictly as a JSON
/// object, and `generateFiles` also needs a `files` array of
/// `{path, contents}` entries.
pub fn normalize_output(
    provider: &'static str,
    kind: TaskKind,
    text: String,
) -> Result<ProviderResult, ProviderError> {
    if !kind.is_structured() {
        return Ok(ProviderResult::Text(text));
    }

    let value = parse_json_object(&text).ok_or_else(|| {
        ProviderError::malformed_output(provider, format!("{} expected a JSON object", kind))
    })?;

    if kind == TaskKind::GenerateFiles && files_from_value(&value).is_none() {
        return Err(ProviderError::malformed_output(
            provider,
            "generateFiles expected {files: [{path, contents}]}",
        ));
    }

    Ok(ProviderResult::Structured(value))
}
