//! Core functionality for the router
//!
//! This module contains the routing logic, provider adapters and the
//! recovery pipeline built on top of them.

pub mod generation;
pub mod providers;
pub mod recovery;
pub mod router;
pub mod traits;
pub mod types;
