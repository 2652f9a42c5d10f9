// Application state for HTTP handlers
use crate::application::chart_renderer::ChartRenderer;
use crate::application::dashboard_component::GymDashboard;
use crate::application::dashboard_service::DashboardLoader;
use crate::application::dashboard_source::DashboardSource;
use crate::application::navigation_service::NavigationActions;
use crate::domain::chart::SurfaceId;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DashboardSource>,
    pub renderer: ChartRenderer,
    pub navigation: NavigationActions,
    pub surfaces: Vec<SurfaceId>,
}

impl AppState {
    /// A fresh, not yet loaded dashboard for one request.
    pub fn dashboard(&self) -> GymDashboard {
        GymDashboard::new(
            DashboardLoader::new(self.source.clone()),
            self.renderer.clone(),
        )
    }
}
