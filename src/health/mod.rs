//! Health evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! HealthEvaluator::evaluate(id) (evaluator.rs):
//!     → HealthCheckService::observations (client.rs)
//!     → classify each region: status contains failure token?
//!     → HealthVerdict::tally (types.rs)
//! ```
//!
//! # Design Decisions
//! - Classification is textual, not a parsed enum
//! - Exactly half of the regions failing already counts as unhealthy
//! - Zero observations is an error, never a vacuous pass
//! - Nothing is carried between evaluations

pub mod client;
pub mod evaluator;
pub mod types;

pub use client::{HealthCheckService, HttpHealthCheckClient};
pub use evaluator::HealthEvaluator;
pub use types::{HealthError, HealthObservation, HealthResult, HealthVerdict};
