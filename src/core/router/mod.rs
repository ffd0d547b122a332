//! Core router: ordered multi-provider fallback
//!
//! - `candidates` - priority tables built from configuration
//! - `error` - routing errors and failed-attempt records
//! - `fallback` - execution result metadata
//! - `router` - the fallback walk itself

pub mod candidates;
pub mod error;
pub mod fallback;
pub mod router;


pub use candidates::PriorityTable;
pub use error::{FailedAttempt, RouterError};
pub use fallback::ExecutionResult;
pub use router::Router;
