// Dashboard service - Use case for loading the dashboard statistics
use crate::application::dashboard_source::DashboardSource;
use crate::application::errors::DashboardError;
use crate::domain::dashboard::DashboardData;
use std::sync::Arc;

/// Result of the single load a dashboard performs.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Arc<DashboardData>),
    Failed(DashboardError),
}

impl LoadOutcome {
    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            LoadOutcome::Loaded(data) => Some(data.as_ref()),
            LoadOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DashboardError> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Failed(e) => Some(e),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

#[derive(Clone)]
pub struct DashboardLoader {
    source: Arc<dyn DashboardSource>,
}

impl DashboardLoader {
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        Self { source }
    }

    /// Fetch once. Failures are logged and reported, never raised.
    pub async fn load(&self) -> LoadOutcome {
        match self.source.fetch_dashboard().await {
            Ok(data) => {
                tracing::debug!(
                    active = data.counts.active,
                    expired = data.counts.expired,
                    "Loaded gym dashboard data"
                );
                LoadOutcome::Loaded(Arc::new(data))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading gym dashboard data");
                LoadOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl DashboardSource for CountingSource {
        async fn fetch_dashboard(&self) -> Result<DashboardData, DashboardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DashboardError::Rpc {
                    code: 200,
                    message: "Odoo Server Error".to_string(),
                })
            } else {
                Ok(DashboardData::default())
            }
        }
    }

    #[tokio::test]
    async fn test_load_success() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), fail: false });
        let loader = DashboardLoader::new(source.clone());

        let outcome = loader.load().await;
        assert!(outcome.is_loaded());
        assert_eq!(outcome.data(), Some(&DashboardData::default()));
        assert!(outcome.error().is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported_not_raised() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), fail: true });
        let loader = DashboardLoader::new(source.clone());

        let outcome = loader.load().await;
        assert!(matches!(outcome, LoadOutcome::Failed(DashboardError::Rpc { code: 200, .. })));
        assert!(outcome.data().is_none());
        assert!(matches!(outcome.error(), Some(DashboardError::Rpc { code: 200, .. })));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
