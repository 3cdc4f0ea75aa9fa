//! Target URL validation.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Validates a target URL and returns it in parsed, canonical form.
///
/// Only HTTP and HTTPS are accepted; schemes like `javascript:`, `data:` and
/// `file:` are rejected.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for malformed URLs or unsupported
/// schemes.
pub fn validate_target_url(raw: &str) -> Result<String, AppError> {
    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        scheme => Err(AppError::bad_request(
            "Only HTTP and HTTPS URLs are allowed",
            json!({ "scheme": scheme }),
        )),
    }
}
