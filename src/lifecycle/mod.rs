//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → scheduler stops waiting for the next tick → exit
//! ```
//!
//! # Design Decisions
//! - A cycle already in progress finishes before the scheduler exits
//! - The cycle deadline bounds how long shutdown can take

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
