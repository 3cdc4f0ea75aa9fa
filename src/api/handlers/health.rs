//! Handler for the liveness probe.

use axum::Json;

use crate::api::dto::HealthResponse;

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
