//! Request payloads handed to provider adapters
//!
//! Images arrive either inline (a `data:` URL) or as a remote URL. Exactly one
//! of the two must be present; anything else is a caller contract violation
//! and is rejected before a single network call is made.

use serde::{Deserialize, Serialize};

/// Caller supplied a payload the router cannot act on
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid payload: {0}")]
pub struct InvalidPayload(pub String);

impl InvalidPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Image reference as supplied on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub mime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageRef {
    /// Image embedded as a `data:<mime>;base64,...` URL
    pub fn inline(mime: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            data_url: Some(data_url.into()),
            url: None,
        }
    }

    /// Image hosted elsewhere
    pub fn remote(mime: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            data_url: None,
            url: Some(url.into()),
        }
    }

    /// Resolve which of the two forms this reference carries
    pub fn source(&self) -> Result<ImageSource<'_>, InvalidPayload> {
        let data_url = non_blank(self.data_url.as_deref());
        let url = non_blank(self.url.as_deref());

        match (data_url, url) {
            (Some(data_url), None) => Ok(ImageSource::Inline {
                mime: &self.mime,
                data_url,
            }),
            (None, Some(url)) => Ok(ImageSource::Remote {
                mime: &self.mime,
                url,
            }),
            (Some(_), Some(_)) => Err(InvalidPayload::new(
                "image must carry exactly one of dataUrl or url",
            )),
            (None, None) => Err(InvalidPayload::new(
                "image missing data: supply dataUrl or url",
            )),
        }
    }
}

/// Validated view over an [`ImageRef`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Inline { mime: &'a str, data_url: &'a str },
    Remote { mime: &'a str, url: &'a str },
}

impl<'a> ImageSource<'a> {
    /// URL usable by vendors that accept either form in one field
    pub fn as_url(&self) -> &'a str {
        match self {
            Self::Inline { data_url, .. } => data_url,
            Self::Remote { url, .. } => url,
        }
    }

    /// Raw base64 payload with any `data:<mime>;base64,` prefix removed
    pub fn base64_data(&self) -> Option<&'a str> {
        match self {
            Self::Inline { data_url, .. } => Some(strip_data_url_prefix(data_url)),
            Self::Remote { .. } => None,
        }
    }

    /// Media type, falling back to the data URL header when `mime` is blank
    pub fn media_type(&self) -> &'a str {
        let (mime, data_url) = match self {
            Self::Inline { mime, data_url } => (*mime, Some(*data_url)),
            Self::Remote { mime, .. } => (*mime, None),
        };

        if !mime.trim().is_empty() {
            return mime;
        }

        data_url
            .and_then(|d| d.strip_prefix("data:"))
            .and_then(|rest| rest.split([';', ',']).next())
            .filter(|m| !m.is_empty())
            .unwrap_or("application/octet-stream")
    }
}

/// Drop the `data:<mime>;base64,` header from a data URL
///
/// Strings that are not data URLs are returned unchanged.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => data_url,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Vision task payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionRequest {
    pub image: ImageRef,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_text: Option<String>,
}

impl VisionRequest {
    pub fn new(image: ImageRef) -> Self {
        Self {
            image,
            tags: Vec::new(),
            system_prompt: None,
            user_text: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_system_prompt(mut self, system: impl Into<String>) -> Self {
        self.system_prompt = Some(system.into());
        self
    }

    pub fn with_user_text(mut self, text: impl Into<String>) -> Self {
        self.user_text = Some(text.into());
        self
    }

    /// `Tags: a, b` line sent alongside the image
    pub fn tags_line(&self) -> String {
        format!("Tags: {}", self.tags.join(", "))
    }

    /// System prompt, if one was supplied and is not blank
    pub fn system(&self) -> Option<&str> {
        non_blank(self.system_prompt.as_deref())
    }

    /// User text, if one was supplied and is not blank
    pub fn user(&self) -> Option<&str> {
        non_blank(self.user_text.as_deref())
    }
}

/// Text-only task payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRequest {
    pub prompt: String,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Payload union carried by a routed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    Vision(VisionRequest),
    Text(TextRequest),
}
