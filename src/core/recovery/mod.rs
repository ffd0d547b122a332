//! Structured-output recovery for image analysis
//!
//! Every image yields a [`RecoveryOutcome`], whatever the providers do.

pub mod outcome;
pub mod pipeline;
pub mod prompts;


pub use outcome::{AnalysisImage, RecoveryOutcome};
pub use pipeline::{AnalysisContext, Recovery, RecoveryPipeline, StageKind};
