// Snapshot dashboard source - Aggregates raw membership records from a JSON file
use crate::application::dashboard_source::DashboardSource;
use crate::application::errors::DashboardError;
use crate::application::navigation_service::Clock;
use crate::domain::dashboard::DashboardData;
use crate::domain::membership::{self, Invoice, Membership};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub memberships: Vec<Membership>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// Reads the snapshot on every fetch so edits show up without a restart.
pub struct SnapshotDashboardSource {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl SnapshotDashboardSource {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }
}

#[async_trait]
impl DashboardSource for SnapshotDashboardSource {
    async fn fetch_dashboard(&self) -> Result<DashboardData, DashboardError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DashboardError::Snapshot {
                path: self.path.clone(),
                source,
            })?;
        let snapshot: Snapshot = serde_json::from_slice(&raw)?;

        tracing::debug!(
            memberships = snapshot.memberships.len(),
            invoices = snapshot.invoices.len(),
            "Aggregating snapshot {}",
            self.path.display()
        );

        Ok(membership::summarize(
            &snapshot.memberships,
            &snapshot.invoices,
            self.clock.today(),
        ))
    }
}
