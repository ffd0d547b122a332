//! Configuration validation

mod config_validators;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub use config_validators::validate_endpoint_url;
