//! Handler for click statistics lookup.

use axum::{Json, extract::Path};

use crate::api::dto::StatsResponse;

/// Returns click statistics for a code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// Currently a stub that always reports zero clicks.
// TODO: aggregate counts from the clicks collection once the reporting
// pipeline reads from MongoDB.
pub async fn stats_handler(Path(code): Path<String>) -> Json<StatsResponse> {
    Json(StatsResponse { code, clicks: 0 })
}
