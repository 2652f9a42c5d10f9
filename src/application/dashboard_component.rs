// Dashboard component - Ties load and render to the host lifecycle
use crate::application::chart_renderer::{ChartRenderer, ChartSink, PendingRender};
use crate::application::dashboard_service::{DashboardLoader, LoadOutcome};
use crate::domain::dashboard::DashboardData;
use std::sync::Arc;

/// A dashboard that has not loaded yet.
///
/// The host drives it through two phases: [`GymDashboard::on_ready`] loads the
/// statistics, then [`ReadyDashboard::on_surfaces_available`] schedules the
/// charts. The second phase only exists on the value the first one returns.
pub struct GymDashboard {
    loader: DashboardLoader,
    renderer: ChartRenderer,
}

impl GymDashboard {
    pub fn new(loader: DashboardLoader, renderer: ChartRenderer) -> Self {
        Self { loader, renderer }
    }

    pub async fn on_ready(self) -> ReadyDashboard {
        let outcome = self.loader.load().await;
        ReadyDashboard {
            outcome,
            renderer: self.renderer,
            render_requested: false,
        }
    }
}

pub struct ReadyDashboard {
    outcome: LoadOutcome,
    renderer: ChartRenderer,
    render_requested: bool,
}

impl ReadyDashboard {
    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.outcome.data()
    }

    /// Schedule the chart render. Returns `None` when nothing was loaded or a
    /// render was already requested; charts are drawn at most once.
    pub fn on_surfaces_available(&mut self, sink: Arc<dyn ChartSink>) -> Option<PendingRender> {
        if self.render_requested {
            tracing::warn!("Surfaces reported twice, ignoring");
            return None;
        }
        self.render_requested = true;

        match &self.outcome {
            LoadOutcome::Loaded(data) => Some(self.renderer.schedule(data.clone(), sink)),
            LoadOutcome::Failed(_) => {
                tracing::debug!("No dashboard data, charts stay blank");
                None
            }
        }
    }
}
