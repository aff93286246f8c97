use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::dto::LivenessResponse;
use crate::api::state::AppState;

/// Component status returned by `GET /health`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub ocr: EngineStatus,
    pub rasterizer: EngineStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct EngineStatus {
    pub status: String,
}

fn engine_status(available: bool) -> EngineStatus {
    EngineStatus {
        status: if available { "available" } else { "unavailable" }.to_string(),
    }
}

/// `GET /`
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = LivenessResponse),
    )
)]
pub async fn root() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Papyr OCR service is alive".to_string(),
    })
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Component availability", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr: engine_status(state.extractor.is_available()),
        rasterizer: engine_status(state.rasterizer.is_available()),
    })
}
