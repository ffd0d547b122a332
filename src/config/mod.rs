//! Configuration management for the gateway
//!
//! Configuration is read once at startup: YAML file (optional), then
//! environment overrides, then validation. The result is shared read-only.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::{Validate, validate_endpoint_url};

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// File (when present) plus process environment overrides
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await?
        } else {
            info!("No configuration file at {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// Recognized keys: `GATEWAY_HOST`, `GATEWAY_PORT`, `GATEWAY_WORKERS`,
    /// `AI_TIMEOUT_MS`, `API_MAX_IMAGE_COUNT`, `API_BODY_SIZE`, and for the
    /// vision family `<FAMILY>_VISION_MODELS` and `<FAMILY>_API_BASE_URL`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(workers) = lookup("GATEWAY_WORKERS") {
            self.server.workers = Some(
                workers
                    .trim()
                    .parse()
                    .map_err(|e| GatewayError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Some(timeout) = lookup("AI_TIMEOUT_MS") {
            self.router.request_timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid AI_TIMEOUT_MS: {}", e)))?;
        }
        if let Some(count) = lookup("API_MAX_IMAGE_COUNT") {
            self.server.max_images = count
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid API_MAX_IMAGE_COUNT: {}", e)))?;
        }
        if let Some(size) = lookup("API_BODY_SIZE") {
            self.server.max_body_size = parse_byte_size(&size).ok_or_else(|| {
                GatewayError::Config(format!("Invalid API_BODY_SIZE: {}", size))
            })?;
        }

        let prefix = self.router.vision_family.env_prefix();
        if let Some(models) = lookup(&format!("{}_VISION_MODELS", prefix)) {
            let models = parse_model_list(&models);
            if !models.is_empty() {
                self.router.vision_models = models;
            }
        }
        if let Some(base) = lookup(&format!("{}_API_BASE_URL", prefix)) {
            self.router.vision_base_url = Some(base.trim().to_string());
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;
        self.router
            .validate()
            .map_err(|e| GatewayError::Config(format!("Router config error: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| GatewayError::Config(format!("Logging config error: {}", e)))?;

        self.server.cors.warn_if_permissive();
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

/// Parse sizes like `1048576`, `512kb`, `50mb` or `1gb`
pub fn parse_byte_size(raw: &str) -> Option<usize> {
    let lower = raw.trim().to_ascii_lowercase();
    let (digits, multiplier) = if let Some(n) = lower.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = lower.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = lower.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = lower.strip_suffix('b') {
        (n, 1)
    } else {
        (lower.as_str(), 1)
    };

    digits
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .filter(|n| *n > 0)
}
