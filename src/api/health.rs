//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::Threshold;

use super::state::AppState;

/// Snapshot of the loaded service
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models_dir: String,
    pub has_lr: bool,
    pub has_xgb: bool,
    pub best_threshold: Threshold,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        models_dir: state.paths.models_dir.display().to_string(),
        has_lr: state.paths.has_logistic(),
        has_xgb: state.paths.has_boosted(),
        best_threshold: state.threshold,
    })
}

/// GET /live - liveness probe, no state involved
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
