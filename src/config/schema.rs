//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the failover
//! controller. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::dns::types::RecordType;

/// Root configuration for the failover controller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FailoverConfig {
    /// Health check being watched for the primary endpoint.
    pub health_check: HealthCheckConfig,

    /// DNS control plane settings.
    pub dns: DnsConfig,

    /// The failover record pair.
    pub record: RecordConfig,

    /// Cadence and deadlines.
    pub controller: ControllerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Health check service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Health check identifier attached to the primary record.
    pub id: String,

    /// Base URL of the health check service.
    pub endpoint: String,

    /// Status text containing this token (case-insensitive) counts as a failure.
    pub failure_token: String,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            endpoint: "http://127.0.0.1:8053".to_string(),
            failure_token: "failure".to_string(),
        }
    }
}

/// DNS control plane configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Base URL of the DNS control plane API.
    pub endpoint: String,

    /// Hosted zone that owns the record pair.
    pub hosted_zone_id: String,

    /// Comment attached to every submitted change batch.
    pub comment: String,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8054".to_string(),
            hosted_zone_id: String::new(),
            comment: "Failover triggered: switching to secondary".to_string(),
        }
    }
}

/// Failover record pair configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Record name shared by both entries (e.g., "app.example.com.").
    pub name: String,

    /// Record type shared by both entries.
    pub record_type: RecordType,

    /// TTL in seconds shared by both entries.
    pub ttl: u32,

    /// Address served while the primary is active.
    pub primary_address: String,

    /// Address served after failover.
    pub secondary_address: String,

    /// Set identifier of the PRIMARY entry.
    pub primary_set_identifier: String,

    /// Set identifier of the SECONDARY entry.
    pub secondary_set_identifier: String,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            record_type: RecordType::A,
            ttl: 60,
            primary_address: String::new(),
            secondary_address: String::new(),
            primary_set_identifier: "primary".to_string(),
            secondary_set_identifier: "secondary".to_string(),
        }
    }
}

/// Controller cadence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Seconds between cycles when running continuously.
    pub interval_secs: u64,

    /// Deadline for a whole cycle (evaluation plus switch) in seconds.
    pub cycle_timeout_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            cycle_timeout_secs: 20,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Optional file receiving JSON log lines in addition to stderr.
    pub log_file: Option<String>,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
