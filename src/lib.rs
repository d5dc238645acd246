//! DNS failover controller library.

pub mod config;
pub mod controller;
pub mod dns;
pub mod health;
pub mod lifecycle;
pub mod observability;

pub use config::schema::FailoverConfig;
pub use controller::{Controller, ControllerOutcome, Scheduler};
pub use lifecycle::Shutdown;
