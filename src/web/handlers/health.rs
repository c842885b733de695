//! Health check HTTP handler

use axum::response::Json;

use crate::web::responses::HealthResponse;

/// Liveness only; the playlist source is per-request and not probed here
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
