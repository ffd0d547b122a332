//! Inputs and outputs of per-image recovery

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::{ImageRef, InvalidPayload};

/// Reference image submitted for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisImage {
    pub id: String,
    pub mime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Inline image as a `data:` URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AnalysisImage {
    pub fn new(id: impl Into<String>, image: ImageRef) -> Self {
        Self {
            id: id.into(),
            mime: image.mime,
            url: image.url,
            blob_base64: image.data_url,
            filename: None,
            width: None,
            height: None,
            tags: Vec::new(),
            description: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Image reference sent to providers
    ///
    /// Inline data wins when both forms are present.
    pub fn image_ref(&self) -> Result<ImageRef, InvalidPayload> {
        let inline = self.blob_base64.as_deref().filter(|d| !d.trim().is_empty());
        let remote = self.url.as_deref().filter(|u| !u.trim().is_empty());

        let image = match (inline, remote) {
            (Some(data_url), _) => ImageRef::inline(&self.mime, data_url),
            (None, Some(url)) => ImageRef::remote(&self.mime, url),
            (None, None) => {
                return Err(InvalidPayload::new(format!(
                    "image {} missing data: supply blobBase64 or url",
                    self.id
                )));
            }
        };
        image.source()?;
        Ok(image)
    }

    /// Caller-supplied description, if not blank
    pub fn caller_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Per-image analysis result; every field is always populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryOutcome {
    pub image_id: String,
    pub tags: Vec<String>,
    pub microdesc: String,
    pub surface_layers: Value,
}

impl RecoveryOutcome {
    /// Deterministic local result used when every provider stage failed
    pub fn stub(image: &AnalysisImage, description: Option<&str>) -> Self {
        Self {
            image_id: image.id.clone(),
            tags: image.tags.clone(),
            microdesc: description
                .map(str::to_string)
                .unwrap_or_else(|| format!("Image {}", image.id)),
            surface_layers: empty_layers(),
        }
    }

    /// Result adopted from a parsed JSON object
    ///
    /// A string `microdesc` overrides `fallback_microdesc`. An object
    /// `surfaceLayers` is taken as-is; otherwise `whole_object_layers` decides
    /// between the entire object and `{}`.
    pub fn from_structured(
        image: &AnalysisImage,
        structured: Value,
        fallback_microdesc: String,
        whole_object_layers: bool,
    ) -> Self {
        let microdesc = structured
            .get("microdesc")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(fallback_microdesc);

        let surface_layers = match structured.get("surfaceLayers") {
            Some(layers @ Value::Object(_)) => layers.clone(),
            _ if whole_object_layers => structured,
            _ => empty_layers(),
        };

        Self {
            image_id: image.id.clone(),
            tags: image.tags.clone(),
            microdesc,
            surface_layers,
        }
    }
}

fn empty_layers() -> Value {
    Value::Object(Map::new())
}
