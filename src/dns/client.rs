//! DNS control plane client.
//!
//! # Responsibilities
//! - Submit one change batch per call
//! - Map control plane rejections to structured errors
//! - Leave retries to the caller's next cycle

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::dns::types::{ChangeBatch, ChangeInfo, DnsError, DnsResult};

/// Anything that accepts atomic change batches for a hosted zone.
#[async_trait]
pub trait DnsControlPlane: Send + Sync {
    /// Submit `batch` as one transaction. Either every change applies or none does.
    async fn change_record_sets(&self, hosted_zone_id: &str, batch: &ChangeBatch)
        -> DnsResult<ChangeInfo>;
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ChangeRequest<'a> {
    change_batch: &'a ChangeBatch,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChangeResponse {
    change_info: ChangeInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// JSON-over-HTTP client for the DNS control plane.
#[derive(Clone)]
pub struct HttpDnsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDnsClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn rrset_url(&self, hosted_zone_id: &str) -> String {
        format!("{}/2013-04-01/hostedzone/{}/rrset", self.base_url, hosted_zone_id)
    }
}

#[async_trait]
impl DnsControlPlane for HttpDnsClient {
    async fn change_record_sets(
        &self,
        hosted_zone_id: &str,
        batch: &ChangeBatch,
    ) -> DnsResult<ChangeInfo> {
        let url = self.rrset_url(hosted_zone_id);
        tracing::debug!(url = %url, changes = batch.changes.len(), "Submitting change batch");

        let response = self
            .client
            .post(&url)
            .json(&ChangeRequest { change_batch: batch })
            .send()
            .await
            .map_err(|e| DnsError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DnsError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        serde_json::from_str::<ChangeResponse>(&body)
            .map(|r| r.change_info)
            .map_err(|e| DnsError::Decode(e.to_string()))
    }
}

fn rejection(status: StatusCode, body: &str) -> DnsError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => DnsError::Rejected {
            code: error.code,
            message: error.message,
        },
        Err(_) => DnsError::Rejected {
            code: status.as_u16().to_string(),
            message: body.trim().to_string(),
        },
    }
}
