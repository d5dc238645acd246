//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Evaluator, switch and controller produce:
//!     → logging.rs (structured log events, one line per region, one per cycle)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr, optional JSON log file
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event for machine parsing
//! - Each cycle carries a cycle ID span
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
