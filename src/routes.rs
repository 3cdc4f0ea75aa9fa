//! Route configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::api::middleware;
use crate::state::AppState;

/// Builds the application router.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a short URL
/// - `GET  /stats/{code}` - Click statistics (stub)
/// - `GET  /health`       - Liveness probe
/// - `GET  /{code}`       - Redirect to the target URL
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .layer(middleware::tracing::layer())
        .with_state(state)
}
