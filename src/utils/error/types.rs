//! Service-level error type

use thiserror::Error;

use crate::core::providers::ProviderError;
use crate::core::types::InvalidPayload;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed task or image payload
    #[error(transparent)]
    InvalidPayload(#[from] InvalidPayload),

    /// Every candidate was skipped or failed
    #[error("{0}")]
    AllProvidersFailed(String),

    /// A single provider call failed
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Server startup and runtime errors
    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Whether the caller sent something unusable
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidPayload(_))
    }
}
