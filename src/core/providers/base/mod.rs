//! Shared plumbing for provider adapters

pub mod http;
pub mod output;

pub use http::{HttpTransport, PoolConfig};
pub use output::normalize_output;
