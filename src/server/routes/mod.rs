//! HTTP route modules
//!
//! - `health` - liveness probe
//! - `analyze` - per-image recovery pipeline
//! - `route` - single routed task
//! - `generate` - generation prompt and component lint

pub mod analyze;
pub mod generate;
pub mod health;
pub mod route;

use actix_web::web;

use crate::config::validate_endpoint_url;
use crate::utils::error::{GatewayError, Result};

/// Configure all routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/analyze", web::post().to(analyze::analyze))
                .route("/route", web::post().to(route::route_task))
                .route("/generate/prompt", web::post().to(generate::generation_prompt))
                .route("/generate/lint", web::post().to(generate::lint)),
        );
}

/// Reject a per-request base URL that is not an absolute http(s) URL
pub(crate) fn check_base_url(base_url: Option<&str>) -> Result<()> {
    match base_url.map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) => validate_endpoint_url(base, "apiBaseUrl").map_err(GatewayError::validation),
        None => Ok(()),
    }
}
