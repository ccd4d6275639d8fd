//! System API endpoints.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiResponse, AppState, SystemStatus};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

/// Reports database reachability and whether the search backend answers
/// its status probe.
///
/// # Endpoint
/// `GET /api/system/status`
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SystemStatus>> {
    let api = &state.shared.search_api;
    let (database, search_api) = tokio::join!(state.store().ping(), api.check_status());

    Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database: database.is_ok(),
        search_api,
        search_base_url: api.base_url().to_string(),
    }))
}

/// `GET /api/system/health/live`
pub async fn health_live() -> impl IntoResponse {
    Json(ApiResponse::success(HealthLiveResponse { status: "alive" }))
}
