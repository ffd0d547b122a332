//! Unified Provider Error Handling
//!
//! One error type shared by every provider adapter. A `ProviderError` always
//! means "this candidate failed"; the router records it and advances.
//!
//! | Variant | Raised when |
//! |------|------|
//! | Authentication | 401/403 from the vendor |
//! | RateLimit | 429 from the vendor |
//! | ModelNotFound | 404 from the vendor |
//! | InvalidRequest | 400, or a payload the adapter cannot encode |
//! | ApiError | any other non-2xx status |
//! | Network | transport failure before a status was read |
//! | Timeout | per-call deadline expired |
//! | ResponseParsing | 2xx whose envelope does not match the vendor shape |
//! | MalformedOutput | 2xx whose text is not the structured output the task needs |
//! | ProviderUnavailable | no adapter registered for the candidate's provider |

/// Unified provider error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        /// 401 or 403 as sent by the vendor
        status: u16,
        message: String,
    },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: &'static str,
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Model '{model}' not found for {provider}")]
    ModelNotFound {
        provider: &'static str,
        model: String,
    },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },

    #[error("Malformed structured output from {provider}: {message}")]
    MalformedOutput {
        provider: &'static str,
        message: String,
    },

    #[error("Provider {provider} is unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        message: String,
    },
}

/// Longest vendor error body echoed into an error message
const MAX_BODY_EXCERPT: usize = 512;

impl ProviderError {
    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            status: 401,
            message: message.into(),
        }
    }

    pub fn forbidden(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            status: 403,
            message: message.into(),
        }
    }

    pub fn rate_limit(provider: &'static str, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider,
            message: match retry_after {
                Some(seconds) => format!("Rate limit exceeded. Retry after {} seconds", seconds),
                None => "Rate limit exceeded".to_string(),
            },
            retry_after,
        }
    }

    pub fn model_not_found(provider: &'static str, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider,
            model: model.into(),
        }
    }

    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    pub fn malformed_output(provider: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            provider,
            message: message.into(),
        }
    }

    pub fn provider_unavailable(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider,
            message: message.into(),
        }
    }

    /// Map a non-2xx vendor status to an error
    ///
    /// `model` is reported on 404 so the failure names what was asked for.
    pub fn from_http_status(provider: &'static str, status: u16, model: &str, body: &str) -> Self {
        let detail = vendor_error_message(body);
        match status {
            400 => Self::invalid_request(provider, format!("Bad request: {}", detail)),
            401 => Self::authentication(provider, "Invalid or missing API key"),
            403 => Self::forbidden(provider, "Forbidden: insufficient permissions"),
            404 => Self::model_not_found(provider, model),
            429 => Self::rate_limit(provider, extract_retry_after(body)),
            500..=599 => Self::api_error(provider, status, format!("Server error: {}", detail)),
            _ => Self::api_error(provider, status, detail),
        }
    }

    /// Provider the error is attributed to
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::ModelNotFound { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::MalformedOutput { provider, .. }
            | Self::ProviderUnavailable { provider, .. } => provider,
        }
    }

    /// HTTP status reported by the vendor, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => Some(*status),
            Self::RateLimit { .. } => Some(429),
            Self::ModelNotFound { .. } => Some(404),
            Self::InvalidRequest { .. } => Some(400),
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Failures that might clear up on their own
    ///
    /// Diagnostic only; the router advances on every failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Network { .. } | Self::Timeout { .. } => true,
            Self::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Pull a human-readable message out of a vendor error body
///
/// Handles `{"error": {"message": ...}}`, `{"error": "..."}` and
/// `{"message": ...}`, falling back to the raw body.
fn vendor_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|json| {
        json.get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(|m| m.as_str())
            .or_else(|| json.get("message").and_then(|m| m.as_str()))
            .map(str::to_owned)
    });

    let message = message.unwrap_or_else(|| body.trim().to_string());
    if message.len() <= MAX_BODY_EXCERPT {
        return message;
    }
    let mut cut = MAX_BODY_EXCERPT;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &message[..cut])
}

fn extract_retry_after(body: &str) -> Option<u64> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    json.get("retry_after")
        .or_else(|| json.get("error").and_then(|e| e.get("retry_after")))
        .and_then(|r| r.as_u64())
}
