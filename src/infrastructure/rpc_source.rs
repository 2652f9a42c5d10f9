// JSON-RPC dashboard source - Reads the statistics from the backend endpoint
use crate::application::dashboard_source::DashboardSource;
use crate::application::errors::DashboardError;
use crate::domain::dashboard::DashboardData;
use crate::infrastructure::json_rpc::{RpcRequest, RpcResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_DATA_PATH: &str = "/mgs_gym/dashboard/data";

#[derive(Debug)]
pub struct RpcDashboardSource {
    client: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl RpcDashboardSource {
    pub fn new(base_url: &str, path: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), path),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DashboardSource for RpcDashboardSource {
    async fn fetch_dashboard(&self) -> Result<DashboardData, DashboardError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Fetching dashboard data from {} (request {})", self.endpoint, id);

        let transport = |source| DashboardError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&RpcRequest::call(id))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Status {
                endpoint: self.endpoint.clone(),
                status,
                body,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let envelope: RpcResponse<DashboardData> = serde_json::from_slice(&body)?;

        match (envelope.result, envelope.error) {
            (_, Some(error)) => Err(DashboardError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(data), None) => Ok(data),
            (None, None) => Err(DashboardError::EmptyResponse),
        }
    }
}
