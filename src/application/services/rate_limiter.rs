//! Fixed-window rate limiter over an atomic counter backend.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

/// Fixed-window counter gating write throughput per caller key.
///
/// Each window gets its own counter key, `rate:{key}:{windowIndex}` with
/// `windowIndex = floor(epochSeconds / windowSeconds)`; a new key is created
/// implicitly each window and expires with it. Bursts at window boundaries
/// are accepted as a known approximation of this scheme, not a defect.
///
/// The backend's increment is atomic, so a post-increment count of exactly 1
/// reliably identifies the first writer in a window, which is the one that
/// arms the key's expiry.
pub struct FixedWindowLimiter {
    counters: Arc<dyn CounterStore>,
}

impl FixedWindowLimiter {
    pub fn new(counters: Arc<dyn CounterStore>) -> Self {
        Self { counters }
    }

    /// Counts a call against `key`'s current window and reports whether it is
    /// within `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] when the counting backend fails. This is
    /// deliberately distinct from `Ok(false)` so callers can choose their
    /// policy; the create path treats it as a rejection (fail-closed).
    pub async fn allow(
        &self,
        key: &str,
        limit: i64,
        window_seconds: u64,
    ) -> Result<bool, AppError> {
        self.allow_at(key, limit, window_seconds, Utc::now().timestamp())
            .await
    }

    async fn allow_at(
        &self,
        key: &str,
        limit: i64,
        window_seconds: u64,
        now_epoch: i64,
    ) -> Result<bool, AppError> {
        let window_index = now_epoch.div_euclid(window_seconds as i64);
        let window_key = format!("rate:{}:{}", key, window_index);

        let count = self
            .counters
            .incr(&window_key)
            .await
            .map_err(|e| AppError::backend(e.to_string(), json!({ "key": key })))?;

        if count == 1 {
            self.counters
                .expire(&window_key, window_seconds)
                .await
                .map_err(|e| AppError::backend(e.to_string(), json!({ "key": key })))?;
        }

        let allowed = count <= limit;
        if !allowed {
            debug!(key, count, limit, "rate limit exceeded");
        }

        Ok(allowed)
    }
}
