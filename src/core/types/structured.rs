//! Strict parsing of structured provider output

use serde_json::Value;

use super::task::GeneratedFile;

/// Parse text strictly as a JSON object
///
/// Surrounding whitespace is tolerated. Arrays, scalars, fenced code blocks
/// and trailing prose are all rejected.
pub fn parse_json_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text.trim())
        .ok()
        .filter(Value::is_object)
}

/// Extract the `files` array of a generate-files result
pub fn files_from_value(value: &Value) -> Option<Vec<GeneratedFile>> {
    let files = value.get("files")?.as_array()?;
    files
        .iter()
        .map(|file| serde_json::from_value::<GeneratedFile>(file.clone()).ok())
        .collect()
}
