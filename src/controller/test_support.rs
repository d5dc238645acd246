//! Scripted collaborators for controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{FailoverConfig, RecordConfig};
use crate::controller::Controller;
use crate::dns::{DnsControlPlane, MemoryZone, RecordType};
use crate::health::{HealthCheckService, HealthError, HealthObservation, HealthResult};

pub enum Script {
    Statuses(Vec<&'static str>),
    Unreachable,
}

/// Health service answering every query from the same script.
pub struct ScriptedHealth {
    script: Script,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl ScriptedHealth {
    pub fn statuses(statuses: Vec<&'static str>) -> Self {
        Self::new(Script::Statuses(statuses), Duration::ZERO)
    }

    pub fn new(script: Script, delay: Duration) -> Self {
        Self {
            script,
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HealthCheckService for ScriptedHealth {
    async fn observations(&self, _id: &str) -> HealthResult<Vec<HealthObservation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.script {
            Script::Statuses(statuses) => Ok(statuses
                .iter()
                .enumerate()
                .map(|(i, s)| HealthObservation::new(format!("region-{i}"), *s))
                .collect()),
            Script::Unreachable => Err(HealthError::Upstream("connection refused".into())),
        }
    }
}

pub fn config() -> FailoverConfig {
    let mut config = FailoverConfig::default();
    config.health_check.id = "hc-1".into();
    config.dns.hosted_zone_id = "Z1".into();
    config.record = RecordConfig {
        name: "app.example.com.".into(),
        record_type: RecordType::A,
        ttl: 60,
        primary_address: "52.66.201.244".into(),
        secondary_address: "15.207.109.242".into(),
        primary_set_identifier: "primary".into(),
        secondary_set_identifier: "secondary".into(),
    };
    config.controller.cycle_timeout_secs = 5;
    config
}

pub fn controller(health: Arc<ScriptedHealth>, zone: Arc<MemoryZone>) -> Controller {
    let plane: Arc<dyn DnsControlPlane> = zone;
    Controller::with_services(&config(), health, plane)
}
