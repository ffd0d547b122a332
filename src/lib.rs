//! # surface-router
//!
//! Multi-provider AI request router with ordered fallback, plus a
//! structured-output recovery pipeline for image analysis.
//!
//! ## Features
//!
//! - **Ordered fallback**: candidates are tried one at a time; the first
//!   success wins and every failed attempt is recorded
//! - **Vendor adapters**: OpenAI-compatible (OpenAI, xAI), Anthropic Messages
//!   and Gemini generateContent envelopes behind one trait
//! - **Recovery pipeline**: every analyzed image yields a result, degrading
//!   from vision JSON to a text-only fallback to a stub
//! - **HTTP surface**: actix-web endpoints for analysis, single tasks and
//!   generation prompts
//!
//! ## Routing a task
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use surface_router::core::providers::{HttpTransport, ProviderKeys, ProviderKind, ProviderRegistry};
//! use surface_router::core::router::{PriorityTable, Router};
//! use surface_router::core::types::{RoutedRequest, TaskKind};
//! use surface_router::config::RouterSettings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(Duration::from_secs(120))?;
//!     let router = Router::new(Arc::new(ProviderRegistry::with_default_adapters(transport)));
//!     let table = PriorityTable::from_settings(&RouterSettings::default());
//!
//!     let keys = ProviderKeys::new().with_key(ProviderKind::OpenAI, "sk-...");
//!     let request = RoutedRequest::compose("Describe a flat blue button");
//!     let candidates = table.candidates_for(TaskKind::Compose, None, None);
//!
//!     let execution = router.route(&request, &candidates, &keys).await?;
//!     println!("{} answered: {}", execution.candidate.label(), execution.result.into_text());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

pub use config::Config;
pub use core::recovery::{AnalysisContext, AnalysisImage, RecoveryOutcome, RecoveryPipeline};
pub use core::router::{ExecutionResult, PriorityTable, Router, RouterError};
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
