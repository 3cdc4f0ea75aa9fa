//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (cache first, shard fan-out on miss, cache repopulation)
/// 2. Hand a click event to the background publisher (non-blocking)
/// 3. Return 307 Temporary Redirect
///
/// The click event's `url_id` is null when the resolution came from cache;
/// this is deliberate and preserved end to end. Click recording never affects
/// the HTTP outcome: a full queue drops the event.
///
/// # Errors
///
/// Returns 404 Not Found when no shard holds the code, and 503 when the
/// cache missed and a shard read failed (a backend failure is never reported
/// as "not found").
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.resolve_service.resolve(&code).await?;

    let event = ClickEvent::new(
        code,
        resolution.url_id,
        Some(client_ip(&headers, addr, state.behind_proxy)),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    state.clicks.record(event);

    Ok(Redirect::temporary(&resolution.target_url))
}
