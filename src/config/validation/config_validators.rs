//! Validators for the gateway configuration structures

use super::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Check that an endpoint is an absolute http(s) URL
///
/// A `{model}` placeholder is allowed in the path.
pub fn validate_endpoint_url(endpoint: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(&endpoint.replace("{model}", "model"))
        .map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }
    Ok(())
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.workers == Some(0) {
            return Err("Server workers must be greater than 0".to_string());
        }
        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }
        if self.max_images == 0 {
            return Err("Max images per request must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RouterSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating router settings");

        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.text_candidates.is_empty() {
            return Err("At least one text candidate must be configured".to_string());
        }
        if self.compose_fallback_model.trim().is_empty() {
            return Err("Compose fallback model cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for candidate in &self.text_candidates {
            if candidate.model.trim().is_empty() {
                return Err(format!("Candidate for {} has an empty model", candidate.provider));
            }
            if !seen.insert((candidate.provider, candidate.model.as_str())) {
                return Err(format!(
                    "Duplicate text candidate: {}/{}",
                    candidate.provider, candidate.model
                ));
            }
            if let Some(endpoint) = &candidate.endpoint {
                validate_endpoint_url(
                    endpoint,
                    &format!("Endpoint for {}/{}", candidate.provider, candidate.model),
                )?;
            }
        }

        if self.vision_models.iter().any(|m| m.trim().is_empty()) {
            return Err("Vision models cannot contain empty entries".to_string());
        }
        if let Some(base) = &self.vision_base_url {
            validate_endpoint_url(base, "Vision base URL")?;
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
