//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    timestamp: i64,
}

/// Liveness; `degraded` while no bundle is loaded
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.detector.is_model_loaded();
    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        model_loaded,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
