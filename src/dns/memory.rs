//! In-memory hosted zone.
//!
//! Applies change batches all-or-nothing: the whole batch is staged against a
//! copy of the zone and committed only if every change is valid. Used for dry
//! runs and as a stand-in control plane in tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::dns::client::DnsControlPlane;
use crate::dns::types::{
    ChangeAction, ChangeBatch, ChangeInfo, DnsError, DnsResult, FailoverRole, RecordType,
    ResourceRecordSet,
};

type RecordKey = (String, RecordType, String);

#[derive(Default)]
struct ZoneState {
    records: BTreeMap<RecordKey, ResourceRecordSet>,
    submissions: usize,
    reject_next: Option<String>,
}

/// A single hosted zone kept in process memory.
#[derive(Default)]
pub struct MemoryZone {
    hosted_zone_id: String,
    state: Mutex<ZoneState>,
}

impl MemoryZone {
    pub fn new(hosted_zone_id: impl Into<String>) -> Self {
        Self {
            hosted_zone_id: hosted_zone_id.into(),
            state: Mutex::default(),
        }
    }

    /// Make the next submission fail with the given message, leaving the zone untouched.
    pub fn reject_next(&self, message: impl Into<String>) {
        self.lock().reject_next = Some(message.into());
    }

    /// Current record sets ordered by name, type and set identifier.
    pub fn records(&self) -> Vec<ResourceRecordSet> {
        self.lock().records.values().cloned().collect()
    }

    /// Number of batches that reached the zone, accepted or not.
    pub fn submissions(&self) -> usize {
        self.lock().submissions
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ZoneState> {
        self.state.lock().expect("memory zone mutex poisoned")
    }
}

#[async_trait]
impl DnsControlPlane for MemoryZone {
    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        batch: &ChangeBatch,
    ) -> DnsResult<ChangeInfo> {
        let mut state = self.lock();
        state.submissions += 1;

        if hosted_zone_id != self.hosted_zone_id {
            return Err(DnsError::Rejected {
                code: "NoSuchHostedZone".into(),
                message: format!("No hosted zone found with ID: {hosted_zone_id}"),
            });
        }
        if let Some(message) = state.reject_next.take() {
            return Err(DnsError::Rejected {
                code: "InvalidChangeBatch".into(),
                message,
            });
        }

        let mut staged = state.records.clone();
        for change in &batch.changes {
            let set = &change.resource_record_set;
            if set.resource_records.is_empty() {
                return Err(DnsError::InvalidChangeBatch(format!(
                    "record set {} has no values",
                    set.set_identifier
                )));
            }
            match change.action {
                ChangeAction::Upsert => {
                    let key = (set.name.clone(), set.record_type, set.set_identifier.clone());
                    staged.insert(key, set.clone());
                }
            }
        }
        check_failover_roles(&staged)?;

        state.records = staged;
        let id = format!("/change/C{:06}", state.submissions);
        tracing::debug!(change_id = %id, changes = batch.changes.len(), "Change batch applied to memory zone");

        Ok(ChangeInfo {
            id,
            status: "INSYNC".into(),
        })
    }
}

/// At most one PRIMARY and one SECONDARY entry may exist per name and type.
fn check_failover_roles(records: &BTreeMap<RecordKey, ResourceRecordSet>) -> DnsResult<()> {
    let mut seen: BTreeMap<(&str, RecordType, FailoverRole), &str> = BTreeMap::new();
    for set in records.values() {
        let key = (set.name.as_str(), set.record_type, set.failover);
        if let Some(existing) = seen.insert(key, set.set_identifier.as_str()) {
            return Err(DnsError::InvalidChangeBatch(format!(
                "{} {} already has a {:?} entry ({existing})",
                set.name, set.record_type, set.failover
            )));
        }
    }
    Ok(())
}
