//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::core::providers::{HttpTransport, ProviderRegistry};
use crate::core::router::{PriorityTable, Router};
use crate::utils::error::Result;

/// HTTP server state shared across handlers
///
/// Built once at startup; every field is read-only after that.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// Fallback router over the vendor adapters
    pub router: Arc<Router>,
    /// Candidate priority lists derived from `config.router`
    pub table: Arc<PriorityTable>,
}

impl AppState {
    /// State with the real vendor adapters sharing one HTTP client
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.router.request_timeout())?;
        let registry = ProviderRegistry::with_default_adapters(transport);
        Ok(Self::with_registry(config, registry))
    }

    /// State over an explicit adapter registry
    pub fn with_registry(config: Config, registry: ProviderRegistry) -> Self {
        let table = PriorityTable::from_settings(&config.router);
        Self {
            config: Arc::new(config),
            router: Arc::new(Router::new(Arc::new(registry))),
            table: Arc::new(table),
        }
    }
}
