//! Metrics collection and exposition.
//!
//! # Metrics
//! - `failover_cycles_total` (counter): cycles by outcome
//! - `failover_cycle_duration_seconds` (histogram): time from evaluation start to terminal state
//! - `failover_observations` (gauge): last tally by classification
//! - `failover_primary_healthy` (gauge): 1=healthy, 0=unhealthy
//! - `failover_switch_total` (counter): switch attempts by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::HealthVerdict;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cycle(outcome: &'static str, started: Instant) {
    counter!("failover_cycles_total", "outcome" => outcome).increment(1);
    histogram!("failover_cycle_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_verdict(verdict: &HealthVerdict) {
    gauge!("failover_observations", "classification" => "healthy").set(verdict.healthy_count as f64);
    gauge!("failover_observations", "classification" => "unhealthy")
        .set(verdict.unhealthy_count() as f64);
    gauge!("failover_primary_healthy").set(if verdict.is_healthy { 1.0 } else { 0.0 });
}

pub fn record_switch(accepted: bool) {
    let result = if accepted { "accepted" } else { "failed" };
    counter!("failover_switch_total", "result" => result).increment(1);
}
