//! Handler for URL shortening.

use axum::{Json, extract::State, http::HeaderMap};

use crate::api::dto::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Flow
///
/// 1. Resolve the owner from the `x-user-id` header (defaults to 1)
/// 2. Validate the target URL
/// 3. Rate-limiter gate (fixed window per owner; fail-closed on backend error)
/// 4. Generate a code and insert into the owner's shard
/// 5. Prime the cache (best effort)
///
/// # Errors
///
/// - 400 for a malformed target URL
/// - 429 when the owner exceeded the current window's limit
/// - 500 when the shard write failed (including code collisions)
/// - 503 when the rate-limit backend failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let owner_id = owner_id_from_headers(&headers);

    let url = state
        .shorten_service
        .create_short_url(owner_id, &payload.url)
        .await?;

    let short_url = format!("{}/{}", state.base_url.trim_end_matches('/'), url.code);

    Ok(Json(ShortenResponse {
        code: url.code,
        short_url,
    }))
}

/// Reads the owner id from the `x-user-id` header.
///
/// A missing or non-numeric header falls back to owner 1; authentication is
/// out of scope and the front proxy is trusted to set this header.
fn owner_id_from_headers(headers: &HeaderMap) -> i64 {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_id_parsed_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "42".parse().unwrap());

        assert_eq!(owner_id_from_headers(&headers), 42);
    }

    #[test]
    fn test_missing_header_defaults_to_one() {
        assert_eq!(owner_id_from_headers(&HeaderMap::new()), 1);
    }

    #[test]
    fn test_non_numeric_header_defaults_to_one() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "abc".parse().unwrap());

        assert_eq!(owner_id_from_headers(&headers), 1);
    }
}
