// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_data, health_check, open_shortcut, show_dashboard};
use crate::infrastructure::rpc_source::DEFAULT_DATA_PATH;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route(DEFAULT_DATA_PATH, post(dashboard_data))
        .route("/dashboard", get(show_dashboard))
        .route("/dashboard/actions/:shortcut", post(open_shortcut))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
