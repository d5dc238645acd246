//! Health evaluation.
//!
//! # Responsibilities
//! - Query every regional observation of the primary's health check
//! - Classify each observation and reduce them to a [`HealthVerdict`]
//! - Log one line per region and one summary line per verdict

use std::sync::Arc;

use crate::health::client::HealthCheckService;
use crate::health::types::{HealthError, HealthResult, HealthVerdict};
use crate::observability::metrics;

pub struct HealthEvaluator {
    service: Arc<dyn HealthCheckService>,
    failure_token: String,
}

impl HealthEvaluator {
    pub fn new(service: Arc<dyn HealthCheckService>, failure_token: impl Into<String>) -> Self {
        Self {
            service,
            failure_token: failure_token.into(),
        }
    }

    /// Evaluate the health check once. Query errors are returned, never retried.
    pub async fn evaluate(&self, health_check_id: &str) -> HealthResult<HealthVerdict> {
        let observations = match self.service.observations(health_check_id).await {
            Ok(observations) => observations,
            Err(e) => {
                tracing::error!(health_check_id = %health_check_id, error = %e, "Failed to get health check status");
                return Err(e);
            }
        };

        let mut unhealthy = 0;
        for observation in &observations {
            if observation.is_failing(&self.failure_token) {
                unhealthy += 1;
                tracing::warn!(
                    region = %observation.region,
                    status = %observation.status_text,
                    "[{}] reported FAILURE for health check {}",
                    observation.region,
                    health_check_id
                );
            } else {
                tracing::info!(
                    region = %observation.region,
                    status = %observation.status_text,
                    "[{}] reported SUCCESS for health check {}",
                    observation.region,
                    health_check_id
                );
            }
        }

        if observations.is_empty() {
            tracing::error!(health_check_id = %health_check_id, "Health check returned no observations");
            return Err(HealthError::NoObservations {
                health_check_id: health_check_id.to_string(),
            });
        }

        let verdict = HealthVerdict::tally(unhealthy, observations.len());
        metrics::record_verdict(&verdict);

        if verdict.is_healthy {
            tracing::info!(
                healthy = verdict.healthy_count,
                total = verdict.total_count,
                "Primary health check passed"
            );
        } else {
            tracing::error!(
                unhealthy = verdict.unhealthy_count(),
                total = verdict.total_count,
                "Primary health check failed in majority of regions"
            );
        }

        Ok(verdict)
    }
}
