// Source trait for dashboard statistics
use crate::application::errors::DashboardError;
use crate::domain::dashboard::DashboardData;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Read the aggregate statistics once. No retries happen behind this call.
    async fn fetch_dashboard(&self) -> Result<DashboardData, DashboardError>;
}
