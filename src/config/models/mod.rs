//! Configuration data models

pub mod logging;
pub mod router;
pub mod server;

pub use logging::*;
pub use router::*;
pub use server::*;

/// Default bind host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    50 * 1024 * 1024 // 50MB
}

/// Default cap on images per analyze request
pub fn default_max_images() -> usize {
    5
}

/// Default per-call provider timeout in milliseconds
pub fn default_request_timeout_ms() -> u64 {
    120_000
}

/// Default model for the text-only compose fallback
pub fn default_compose_fallback_model() -> String {
    "grok-mini".to_string()
}

/// Default log level filter
pub fn default_log_level() -> String {
    "info".to_string()
}
