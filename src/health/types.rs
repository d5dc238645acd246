//! Health observation and verdict types, and error definitions.

use serde::Serialize;
use thiserror::Error;

/// One region's report for one health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthObservation {
    pub region: String,
    pub status_text: String,
}

impl HealthObservation {
    pub fn new(region: impl Into<String>, status_text: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            status_text: status_text.into(),
        }
    }

    /// A status is failing when it mentions `failure_token`, ignoring case.
    ///
    /// Anything else passes, including statuses that are unknown or malformed.
    pub fn is_failing(&self, failure_token: &str) -> bool {
        self.status_text
            .to_lowercase()
            .contains(&failure_token.to_lowercase())
    }
}

/// Result of reducing one cycle's observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthVerdict {
    pub healthy_count: usize,
    pub total_count: usize,
    pub is_healthy: bool,
}

impl HealthVerdict {
    /// Healthy while fewer than half of the reporting regions fail.
    ///
    /// Exactly half failing is unhealthy: `unhealthy >= total / 2` triggers failover.
    pub fn tally(unhealthy_count: usize, total_count: usize) -> Self {
        debug_assert!(unhealthy_count <= total_count);
        Self {
            healthy_count: total_count - unhealthy_count,
            total_count,
            // unhealthy < total / 2, kept in integers
            is_healthy: unhealthy_count * 2 < total_count,
        }
    }

    pub fn unhealthy_count(&self) -> usize {
        self.total_count - self.healthy_count
    }
}

/// Errors that can occur while evaluating health.
#[derive(Debug, Error)]
pub enum HealthError {
    /// The health check service could not be reached.
    #[error("health check service unreachable: {0}")]
    Upstream(String),

    /// The health check service answered with an error status.
    #[error("health check service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The health check service answered with an unexpected payload.
    #[error("malformed health check response: {0}")]
    Decode(String),

    /// No region reported; the tally would be vacuously healthy.
    #[error("health check {health_check_id} returned no observations")]
    NoObservations { health_check_id: String },

    /// The cycle deadline expired before the service answered.
    #[error("health check query timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type for health operations.
pub type HealthResult<T> = Result<T, HealthError>;
