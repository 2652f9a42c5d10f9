// HTTP request handlers
use crate::domain::chart::{ChartConfig, SurfaceId};
use crate::domain::dashboard::{DashboardData, MembershipCounts};
use crate::domain::navigation::{MembershipShortcut, NavigationRequest};
use crate::infrastructure::json_rpc::{RpcRequest, RpcResponse, SERVER_ERROR_CODE};
use crate::infrastructure::surface_registry::SurfaceRegistry;
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<MembershipCounts>,
    pub charts: BTreeMap<SurfaceId, ChartConfig>,
    pub drawn: Vec<SurfaceId>,
    pub skipped: Vec<SurfaceId>,
    pub failed: Vec<SurfaceId>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// JSON-RPC endpoint serving the configured source's statistics
pub async fn dashboard_data(
    State(state): State<Arc<AppState>>,
    Json(call): Json<RpcRequest>,
) -> Json<RpcResponse<DashboardData>> {
    match state.source.fetch_dashboard().await {
        Ok(data) => Json(RpcResponse::success(call.id, data)),
        Err(e) => {
            tracing::error!(error = %e, "Error producing dashboard data");
            Json(RpcResponse::failure(call.id, SERVER_ERROR_CODE, e.to_string()))
        }
    }
}

/// Run the dashboard once against the configured surfaces
pub async fn show_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let mut dashboard = state.dashboard().on_ready().await;
    let registry = Arc::new(SurfaceRegistry::new(state.surfaces.iter().copied()));

    let report = match dashboard.on_surfaces_available(registry.clone()) {
        Some(pending) => pending.finished().await,
        None => None,
    };
    let report = report.unwrap_or_default();

    Json(DashboardView {
        loaded: dashboard.outcome().is_loaded(),
        error: dashboard.outcome().error().map(|e| e.to_string()),
        counts: dashboard.data().map(|data| data.counts),
        charts: registry.charts(),
        drawn: report.drawn,
        skipped: report.skipped,
        failed: report.failed,
    })
}

/// Open one of the membership list shortcuts on the host
pub async fn open_shortcut(
    Path(shortcut): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<NavigationRequest>), ApiError> {
    let shortcut: MembershipShortcut = shortcut.parse().map_err(ApiError::NotFound)?;

    let navigation = &state.navigation;
    let dispatched = match shortcut {
        MembershipShortcut::Active => navigation.open_active_memberships().await,
        MembershipShortcut::Expired => navigation.open_expired_memberships().await,
        MembershipShortcut::Suspended => navigation.open_suspended_memberships().await,
        MembershipShortcut::AboutToExpire => navigation.open_about_to_expire().await,
    };
    let request = dispatched.map_err(|e| {
        tracing::error!(error = %e, "Navigation dispatch failed");
        ApiError::BadGateway(e.to_string())
    })?;

    Ok((StatusCode::ACCEPTED, Json(request)))
}
