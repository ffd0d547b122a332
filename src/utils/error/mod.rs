//! Error handling for the service
//!
//! This module defines the service-level error type and its HTTP rendering.

mod conversions;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
