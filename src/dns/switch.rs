//! Failover switch.
//!
//! # Responsibilities
//! - Build the change batch that makes the secondary endpoint active
//! - Submit it as a single transaction
//!
//! # Design Decisions
//! - Both halves of the pair are upserted every time, so a pair where only one
//!   entry drifted is repaired by the same write
//! - There is no switch back to primary; fail-back is a manual action

use std::sync::Arc;

use crate::config::FailoverConfig;
use crate::dns::client::DnsControlPlane;
use crate::dns::types::{ChangeBatch, ChangeInfo, DnsResult, FailoverRecordSet};
use crate::observability::metrics;

/// Re-asserts the secondary-active record pair on the DNS control plane.
pub struct FailoverSwitch {
    plane: Arc<dyn DnsControlPlane>,
    hosted_zone_id: String,
    records: FailoverRecordSet,
    comment: String,
}

impl FailoverSwitch {
    pub fn new(
        plane: Arc<dyn DnsControlPlane>,
        hosted_zone_id: impl Into<String>,
        records: FailoverRecordSet,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            plane,
            hosted_zone_id: hosted_zone_id.into(),
            records,
            comment: comment.into(),
        }
    }

    pub fn from_config(plane: Arc<dyn DnsControlPlane>, config: &FailoverConfig) -> Self {
        Self::new(
            plane,
            config.dns.hosted_zone_id.clone(),
            FailoverRecordSet::from_config(&config.record, &config.health_check.id),
            config.dns.comment.clone(),
        )
    }

    /// The exact batch [`switch_to_secondary`](Self::switch_to_secondary) submits.
    pub fn change_batch(&self) -> ChangeBatch {
        self.records.to_change_batch(Some(self.comment.as_str()))
    }

    pub fn records(&self) -> &FailoverRecordSet {
        &self.records
    }

    pub fn hosted_zone_id(&self) -> &str {
        &self.hosted_zone_id
    }

    /// Submit the PRIMARY and SECONDARY upserts as one batch.
    ///
    /// Repeating the call with the pair already in place changes nothing.
    pub async fn switch_to_secondary(&self) -> DnsResult<ChangeInfo> {
        let secondary = self
            .records
            .secondary
            .resource_records
            .first()
            .map(|r| r.value.as_str())
            .unwrap_or_default();

        tracing::warn!(
            hosted_zone_id = %self.hosted_zone_id,
            record = %self.records.primary.name,
            secondary = %secondary,
            "Primary is unhealthy, switching to secondary"
        );

        match self
            .plane
            .change_record_sets(&self.hosted_zone_id, &self.change_batch())
            .await
        {
            Ok(info) => {
                tracing::info!(change_id = %info.id, status = %info.status, "Failover update submitted");
                tracing::info!(secondary = %secondary, "DNS traffic will now resolve to secondary");
                metrics::record_switch(true);
                Ok(info)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update DNS records");
                metrics::record_switch(false);
                Err(e)
            }
        }
    }
}
