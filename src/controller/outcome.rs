//! Terminal states of one controller cycle.

use crate::dns::{ChangeInfo, DnsError};
use crate::health::{HealthError, HealthVerdict};

/// How a single cycle ended.
#[derive(Debug)]
pub enum ControllerOutcome {
    /// Primary healthy; nothing was written.
    NoActionHealthy { verdict: HealthVerdict },
    /// Primary unhealthy; the secondary-active pair was accepted.
    FailoverTriggered {
        verdict: HealthVerdict,
        change: ChangeInfo,
    },
    /// Primary unhealthy; the change batch was rejected or timed out.
    FailoverAttemptedButFailed {
        verdict: HealthVerdict,
        error: DnsError,
    },
    /// Health could not be determined; no DNS call was made.
    EvaluationFailed { error: HealthError },
}

impl ControllerOutcome {
    /// Stable label used for metrics and reports.
    pub fn label(&self) -> &'static str {
        match self {
            ControllerOutcome::NoActionHealthy { .. } => "no_action_healthy",
            ControllerOutcome::FailoverTriggered { .. } => "failover_triggered",
            ControllerOutcome::FailoverAttemptedButFailed { .. } => "failover_failed",
            ControllerOutcome::EvaluationFailed { .. } => "evaluation_failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ControllerOutcome::NoActionHealthy { .. } | ControllerOutcome::FailoverTriggered { .. }
        )
    }

    /// Process exit code for a one-shot run.
    pub fn exit_code(&self) -> u8 {
        match self {
            ControllerOutcome::NoActionHealthy { .. } | ControllerOutcome::FailoverTriggered { .. } => 0,
            ControllerOutcome::EvaluationFailed { .. } => 2,
            ControllerOutcome::FailoverAttemptedButFailed { .. } => 3,
        }
    }

    pub fn verdict(&self) -> Option<&HealthVerdict> {
        match self {
            ControllerOutcome::NoActionHealthy { verdict }
            | ControllerOutcome::FailoverTriggered { verdict, .. }
            | ControllerOutcome::FailoverAttemptedButFailed { verdict, .. } => Some(verdict),
            ControllerOutcome::EvaluationFailed { .. } => None,
        }
    }

    /// Emit the one summary line of the cycle.
    pub(crate) fn log_summary(&self) {
        match self {
            ControllerOutcome::NoActionHealthy { verdict } => tracing::info!(
                outcome = self.label(),
                healthy = verdict.healthy_count,
                total = verdict.total_count,
                "Primary is healthy. No action required"
            ),
            ControllerOutcome::FailoverTriggered { verdict, change } => tracing::warn!(
                outcome = self.label(),
                unhealthy = verdict.unhealthy_count(),
                total = verdict.total_count,
                change_id = %change.id,
                "Primary is unhealthy. Failover to secondary submitted"
            ),
            ControllerOutcome::FailoverAttemptedButFailed { verdict, error } => tracing::error!(
                outcome = self.label(),
                unhealthy = verdict.unhealthy_count(),
                total = verdict.total_count,
                error = %error,
                "Primary is unhealthy. Failover to secondary failed"
            ),
            ControllerOutcome::EvaluationFailed { error } => tracing::error!(
                outcome = self.label(),
                error = %error,
                "Primary health could not be evaluated"
            ),
        }
    }
}
