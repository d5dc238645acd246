//! Failover controller.
//!
//! # Data Flow
//! ```text
//! one-shot:   Controller::run (cycle.rs) → ControllerOutcome (outcome.rs)
//! continuous: Scheduler (scheduler.rs) → Controller::run per tick → SchedulerReport
//!
//! Controller::run:
//!     → HealthEvaluator::evaluate
//!     → unhealthy? FailoverSwitch::switch_to_secondary
//! ```
//!
//! # Design Decisions
//! - The evaluator and switch never call each other
//! - Configuration is fixed at construction; nothing is kept between runs

pub mod cycle;
pub mod outcome;
pub mod scheduler;

#[cfg(test)]
mod test_support;

pub use cycle::Controller;
pub use outcome::ControllerOutcome;
pub use scheduler::{Scheduler, SchedulerReport};
