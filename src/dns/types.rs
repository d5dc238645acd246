//! Record-set types, change batches and error definitions.
//!
//! Field names follow the control plane's PascalCase wire format so the same
//! types are used for requests, responses and the in-memory zone.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RecordConfig;

/// DNS record type shared by both halves of the failover pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "CNAME")]
    Cname,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
        })
    }
}

/// Traffic-routing priority of a record-set entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FailoverRole {
    Primary,
    Secondary,
}

/// A single value of a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    pub value: String,
}

/// One entry of a failover record pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: RecordType,
    pub set_identifier: String,
    pub failover: FailoverRole,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    pub resource_records: Vec<ResourceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
}

/// The desired PRIMARY/SECONDARY pair for one record name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverRecordSet {
    pub primary: ResourceRecordSet,
    pub secondary: ResourceRecordSet,
}

impl FailoverRecordSet {
    /// Build the pair from configuration. Only the primary carries the health check.
    pub fn from_config(record: &RecordConfig, health_check_id: &str) -> Self {
        let entry = |set_identifier: &str, failover: FailoverRole, address: &str| ResourceRecordSet {
            name: record.name.clone(),
            record_type: record.record_type,
            set_identifier: set_identifier.to_string(),
            failover,
            ttl: record.ttl,
            resource_records: vec![ResourceRecord {
                value: address.to_string(),
            }],
            health_check_id: None,
        };

        let mut primary = entry(
            &record.primary_set_identifier,
            FailoverRole::Primary,
            &record.primary_address,
        );
        primary.health_check_id = Some(health_check_id.to_string());

        let secondary = entry(
            &record.secondary_set_identifier,
            FailoverRole::Secondary,
            &record.secondary_address,
        );

        Self { primary, secondary }
    }

    /// One batch upserting both halves, primary first.
    pub fn to_change_batch(&self, comment: Option<&str>) -> ChangeBatch {
        ChangeBatch {
            comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
            changes: vec![
                Change::upsert(self.primary.clone()),
                Change::upsert(self.secondary.clone()),
            ],
        }
    }
}

/// Action applied to a record set within a change batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Upsert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    pub action: ChangeAction,
    pub resource_record_set: ResourceRecordSet,
}

impl Change {
    pub fn upsert(resource_record_set: ResourceRecordSet) -> Self {
        Self {
            action: ChangeAction::Upsert,
            resource_record_set,
        }
    }
}

/// An atomic set of changes submitted as one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub changes: Vec<Change>,
}

/// Acknowledgement returned for an accepted change batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeInfo {
    pub id: String,
    pub status: String,
}

/// Errors that can occur while updating DNS.
#[derive(Debug, Error)]
pub enum DnsError {
    /// The control plane refused the batch; nothing was applied.
    #[error("change batch rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The control plane could not be reached.
    #[error("DNS control plane unreachable: {0}")]
    Transport(String),

    /// The control plane answered with an unexpected payload.
    #[error("malformed DNS control plane response: {0}")]
    Decode(String),

    /// The batch would break the one-PRIMARY/one-SECONDARY invariant.
    #[error("invalid change batch: {0}")]
    InvalidChangeBatch(String),

    /// The cycle deadline expired before the control plane answered.
    #[error("DNS update timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type for DNS operations.
pub type DnsResult<T> = Result<T, DnsError>;
