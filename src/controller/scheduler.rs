//! Fixed-cadence cycle scheduling.
//!
//! # Responsibilities
//! - Run one cycle per interval until shutdown
//! - Keep a per-outcome tally for the final report
//!
//! # Design Decisions
//! - Cycles never overlap: the next tick is awaited only after a cycle ends,
//!   and ticks missed during a slow cycle are delayed rather than bursted
//! - Shutdown is observed between cycles; a running cycle reaches its
//!   terminal state first so a change batch is never abandoned mid-flight

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::controller::cycle::Controller;
use crate::controller::outcome::ControllerOutcome;

/// Counts of cycle outcomes over one scheduler run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchedulerReport {
    pub cycles: usize,
    pub no_action_healthy: usize,
    pub failover_triggered: usize,
    pub failover_failed: usize,
    pub evaluation_failed: usize,
}

impl SchedulerReport {
    fn record(&mut self, outcome: &ControllerOutcome) {
        self.cycles += 1;
        match outcome {
            ControllerOutcome::NoActionHealthy { .. } => self.no_action_healthy += 1,
            ControllerOutcome::FailoverTriggered { .. } => self.failover_triggered += 1,
            ControllerOutcome::FailoverAttemptedButFailed { .. } => self.failover_failed += 1,
            ControllerOutcome::EvaluationFailed { .. } => self.evaluation_failed += 1,
        }
    }
}

pub struct Scheduler {
    controller: Arc<Controller>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(controller: Arc<Controller>, interval: Duration) -> Self {
        Self { controller, interval }
    }

    /// Run cycles until `shutdown` fires. The first cycle starts immediately.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> SchedulerReport {
        tracing::info!(
            interval = ?self.interval,
            health_check_id = %self.controller.health_check_id(),
            "Failover controller starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut report = SchedulerReport::default();

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Scheduler received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.controller.run().await;
                    report.record(&outcome);
                }
            }
        }

        tracing::info!(
            cycles = report.cycles,
            failover_triggered = report.failover_triggered,
            failover_failed = report.failover_failed,
            evaluation_failed = report.evaluation_failed,
            "Failover controller stopped"
        );
        report
    }
}
