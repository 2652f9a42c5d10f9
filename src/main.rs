// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chart_renderer::ChartRenderer;
use crate::application::dashboard_source::DashboardSource;
use crate::application::navigation_service::{LocalClock, NavigationActions};
use crate::infrastructure::config::{SourceSettings, load_settings};
use crate::infrastructure::http_dispatcher::HttpActionDispatcher;
use crate::infrastructure::rpc_source::RpcDashboardSource;
use crate::infrastructure::snapshot_source::SnapshotDashboardSource;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let settings = load_settings()?;
    let clock = Arc::new(LocalClock);

    // Create data source (infrastructure layer)
    let source: Arc<dyn DashboardSource> = match &settings.source {
        SourceSettings::Rpc { base_url, path } => {
            let source = RpcDashboardSource::new(base_url, path);
            tracing::info!("Reading dashboard data from {}", source.endpoint());
            Arc::new(source)
        }
        SourceSettings::Snapshot { path } => {
            tracing::info!("Aggregating dashboard data from snapshot {}", path);
            Arc::new(SnapshotDashboardSource::new(path, clock.clone()))
        }
    };
    let dispatcher = Arc::new(HttpActionDispatcher::new(settings.dispatch.endpoint.clone()));

    // Create application state
    let state = Arc::new(AppState {
        source,
        renderer: ChartRenderer::new(settings.render.delay()),
        navigation: NavigationActions::new(dispatcher, clock),
        surfaces: settings.render.surfaces.clone(),
    });

    // Start server
    let addr: SocketAddr = settings.server.listen.parse()?;
    tracing::info!("Starting gym-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
