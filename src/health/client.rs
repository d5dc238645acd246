//! Health check service client.
//!
//! # Responsibilities
//! - Fetch the per-region observations of one health check
//! - Translate the service payload into [`HealthObservation`]s, in order

use async_trait::async_trait;
use serde::Deserialize;

use crate::health::types::{HealthError, HealthObservation, HealthResult};

/// Read-only source of regional health observations.
#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn observations(&self, health_check_id: &str) -> HealthResult<Vec<HealthObservation>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StatusResponse {
    #[serde(default)]
    health_check_observations: Vec<ObservationBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ObservationBody {
    region: Option<String>,
    status_report: StatusReport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StatusReport {
    status: String,
}

impl From<ObservationBody> for HealthObservation {
    fn from(body: ObservationBody) -> Self {
        HealthObservation {
            region: body.region.unwrap_or_else(|| "Unknown".to_string()),
            status_text: body.status_report.status,
        }
    }
}

/// JSON-over-HTTP client for the health check service.
#[derive(Clone)]
pub struct HttpHealthCheckClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHealthCheckClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn status_url(&self, health_check_id: &str) -> String {
        format!("{}/2013-04-01/healthcheck/{}/status", self.base_url, health_check_id)
    }
}

#[async_trait]
impl HealthCheckService for HttpHealthCheckClient {
    async fn observations(&self, health_check_id: &str) -> HealthResult<Vec<HealthObservation>> {
        let url = self.status_url(health_check_id);
        tracing::debug!(url = %url, "Querying health check status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HealthError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HealthError::Upstream(e.to_string()))?;

        if !status.is_success() {
            return Err(HealthError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        parse_observations(&body)
    }
}

fn parse_observations(body: &str) -> HealthResult<Vec<HealthObservation>> {
    let parsed: StatusResponse =
        serde_json::from_str(body).map_err(|e| HealthError::Decode(e.to_string()))?;
    Ok(parsed
        .health_check_observations
        .into_iter()
        .map(HealthObservation::from)
        .collect())
}
