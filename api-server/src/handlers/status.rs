//! Service status handler

use axum::{extract::State, Json};
use phishguard_core::{BundleMetadata, EngineStatus, LayoutInfo};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct SchemaInfo {
    /// Layout this server extracts
    extractor: LayoutInfo,
    /// Layout the loaded bundle declares, if any
    bundle: Option<LayoutInfo>,
    compatible: Option<bool>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    status: &'static str,
    endpoints: Vec<&'static str>,
    model_loaded: bool,
    scaler_loaded: bool,
    engine: EngineStatus,
    schema: SchemaInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle: Option<BundleMetadata>,
}

pub async fn index(State(state): State<AppState>) -> Json<StatusResponse> {
    let detector = &state.detector;
    let bundle = detector.bundle();

    Json(StatusResponse {
        status: "API is running",
        endpoints: vec!["/predict"],
        model_loaded: detector.is_model_loaded(),
        scaler_loaded: detector.is_model_loaded(),
        engine: detector.status(),
        schema: SchemaInfo {
            extractor: LayoutInfo::current(),
            bundle: bundle.and_then(|b| b.schema().cloned()),
            compatible: bundle.and_then(|b| b.schema_compatible()),
        },
        bundle: bundle.map(|b| b.metadata().clone()),
    })
}
