//! Routed tasks and their normalized results

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{InvalidPayload, RequestPayload, TextRequest, VisionRequest};

/// Kind of work a routed request asks a provider to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    /// Free-text description of an image
    VisionDescribe,
    /// JSON object extracted from an image
    VisionStructured,
    /// Free-text completion of a text prompt
    Compose,
    /// `{files: [{path, contents}]}` object produced from a text prompt
    GenerateFiles,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::VisionDescribe => "visionDescribe",
            TaskKind::VisionStructured => "visionStructured",
            TaskKind::Compose => "compose",
            TaskKind::GenerateFiles => "generateFiles",
        }
    }

    pub fn is_vision(&self) -> bool {
        matches!(self, TaskKind::VisionDescribe | TaskKind::VisionStructured)
    }

    /// Whether the provider text must parse as a JSON object
    pub fn is_structured(&self) -> bool {
        matches!(self, TaskKind::VisionStructured | TaskKind::GenerateFiles)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task paired with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedRequest {
    pub kind: TaskKind,
    pub payload: RequestPayload,
}

impl RoutedRequest {
    pub fn vision_describe(request: VisionRequest) -> Self {
        Self {
            kind: TaskKind::VisionDescribe,
            payload: RequestPayload::Vision(request),
        }
    }

    pub fn vision_structured(request: VisionRequest) -> Self {
        Self {
            kind: TaskKind::VisionStructured,
            payload: RequestPayload::Vision(request),
        }
    }

    pub fn compose(prompt: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::Compose,
            payload: RequestPayload::Text(TextRequest::new(prompt)),
        }
    }

    pub fn generate_files(prompt: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::GenerateFiles,
            payload: RequestPayload::Text(TextRequest::new(prompt)),
        }
    }

    /// Check the payload matches the task kind
    pub fn validate(&self) -> Result<(), InvalidPayload> {
        match (&self.payload, self.kind.is_vision()) {
            (RequestPayload::Vision(vision), true) => vision.image.source().map(|_| ()),
            (RequestPayload::Text(text), false) => {
                if text.prompt.trim().is_empty() {
                    Err(InvalidPayload::new(format!(
                        "{} requires a non-empty prompt",
                        self.kind
                    )))
                } else {
                    Ok(())
                }
            }
            (RequestPayload::Text(_), true) => Err(InvalidPayload::new(format!(
                "{} requires an image payload",
                self.kind
            ))),
            (RequestPayload::Vision(_), false) => Err(InvalidPayload::new(format!(
                "{} requires a text prompt",
                self.kind
            ))),
        }
    }
}

/// Normalized provider output
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResult {
    Text(String),
    Structured(Value),
}

impl ProviderResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ProviderResult::Text(text) => Some(text),
            ProviderResult::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ProviderResult::Structured(value) => Some(value),
            ProviderResult::Text(_) => None,
        }
    }

    /// Text form; structured results are re-serialized
    pub fn into_text(self) -> String {
        match self {
            ProviderResult::Text(text) => text,
            ProviderResult::Structured(value) => value.to_string(),
        }
    }

    /// JSON form used on the HTTP surface
    pub fn into_value(self) -> Value {
        match self {
            ProviderResult::Text(text) => Value::String(text),
            ProviderResult::Structured(value) => value,
        }
    }
}

/// Single file produced by a `generateFiles` task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}
