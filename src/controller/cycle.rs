//! One evaluate-then-maybe-switch cycle.
//!
//! # States
//! ```text
//! EVALUATING → healthy   → NoActionHealthy
//!            → unhealthy → SWITCHING → accepted → FailoverTriggered
//!                                    → error    → FailoverAttemptedButFailed
//!            → error     → EvaluationFailed
//! ```
//!
//! # Design Decisions
//! - Memoryless: no state survives a cycle, a repeated unhealthy verdict
//!   re-submits the same idempotent batch
//! - One deadline covers the whole cycle; time spent evaluating shortens the
//!   budget left for the switch

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout_at;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::FailoverConfig;
use crate::controller::outcome::ControllerOutcome;
use crate::dns::{DnsControlPlane, DnsError, FailoverSwitch, HttpDnsClient};
use crate::health::{HealthCheckService, HealthError, HealthEvaluator, HealthResult, HealthVerdict, HttpHealthCheckClient};
use crate::observability::metrics;

/// Runs failover cycles for one health check and record pair.
pub struct Controller {
    health_check_id: String,
    evaluator: HealthEvaluator,
    switch: FailoverSwitch,
    cycle_timeout: Duration,
}

impl Controller {
    pub fn new(
        health_check_id: impl Into<String>,
        evaluator: HealthEvaluator,
        switch: FailoverSwitch,
        cycle_timeout: Duration,
    ) -> Self {
        Self {
            health_check_id: health_check_id.into(),
            evaluator,
            switch,
            cycle_timeout,
        }
    }

    /// Controller talking to the HTTP services named in `config`.
    pub fn from_config(config: &FailoverConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Like [`from_config`](Self::from_config), sharing a caller-built HTTP client.
    pub fn with_http_client(config: &FailoverConfig, client: reqwest::Client) -> Self {
        let health = Arc::new(HttpHealthCheckClient::with_client(
            client.clone(),
            &config.health_check.endpoint,
        ));
        let dns = Arc::new(HttpDnsClient::with_client(client, &config.dns.endpoint));
        Self::with_services(config, health, dns)
    }

    /// Controller over arbitrary collaborators.
    pub fn with_services(
        config: &FailoverConfig,
        health: Arc<dyn HealthCheckService>,
        dns: Arc<dyn DnsControlPlane>,
    ) -> Self {
        Self::new(
            config.health_check.id.clone(),
            HealthEvaluator::new(health, config.health_check.failure_token.clone()),
            FailoverSwitch::from_config(dns, config),
            Duration::from_secs(config.controller.cycle_timeout_secs),
        )
    }

    pub fn switch(&self) -> &FailoverSwitch {
        &self.switch
    }

    pub fn health_check_id(&self) -> &str {
        &self.health_check_id
    }

    /// Evaluate health only, bounded by the cycle deadline. Never touches DNS.
    pub async fn evaluate(&self) -> HealthResult<HealthVerdict> {
        let deadline = tokio::time::Instant::now() + self.cycle_timeout;
        self.evaluate_until(deadline).await
    }

    /// Run one cycle to its terminal state.
    pub async fn run(&self) -> ControllerOutcome {
        let span = tracing::info_span!(
            "cycle",
            cycle_id = %Uuid::new_v4(),
            health_check_id = %self.health_check_id
        );
        self.run_cycle().instrument(span).await
    }

    async fn run_cycle(&self) -> ControllerOutcome {
        let started = Instant::now();
        let deadline = tokio::time::Instant::now() + self.cycle_timeout;

        tracing::info!("Checking primary DNS health");
        let outcome = match self.evaluate_until(deadline).await {
            Err(error) => ControllerOutcome::EvaluationFailed { error },
            Ok(verdict) if verdict.is_healthy => ControllerOutcome::NoActionHealthy { verdict },
            Ok(verdict) => match timeout_at(deadline, self.switch.switch_to_secondary()).await {
                Ok(Ok(change)) => ControllerOutcome::FailoverTriggered { verdict, change },
                Ok(Err(error)) => ControllerOutcome::FailoverAttemptedButFailed { verdict, error },
                Err(_) => {
                    tracing::error!(timeout = ?self.cycle_timeout, "DNS update exceeded cycle deadline");
                    ControllerOutcome::FailoverAttemptedButFailed {
                        verdict,
                        error: DnsError::Timeout(self.cycle_timeout),
                    }
                }
            },
        };

        outcome.log_summary();
        metrics::record_cycle(outcome.label(), started);
        outcome
    }

    async fn evaluate_until(&self, deadline: tokio::time::Instant) -> HealthResult<HealthVerdict> {
        match timeout_at(deadline, self.evaluator.evaluate(&self.health_check_id)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(timeout = ?self.cycle_timeout, "Health check query exceeded cycle deadline");
                Err(HealthError::Timeout(self.cycle_timeout))
            }
        }
    }
}
