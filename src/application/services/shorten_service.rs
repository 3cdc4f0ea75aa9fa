//! The create-URL workflow.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::application::router::ShardRouter;
use crate::application::services::{FixedWindowLimiter, ResolveService};
use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_target_url;

/// Orchestrates URL creation: validation, rate limiting, code generation,
/// shard insert, and cache priming.
pub struct ShortenService {
    router: Arc<ShardRouter>,
    limiter: Arc<FixedWindowLimiter>,
    resolver: Arc<ResolveService>,
    rate_limit: i64,
    rate_window_seconds: u64,
}

impl ShortenService {
    pub fn new(
        router: Arc<ShardRouter>,
        limiter: Arc<FixedWindowLimiter>,
        resolver: Arc<ResolveService>,
        rate_limit: i64,
        rate_window_seconds: u64,
    ) -> Self {
        Self {
            router,
            limiter,
            resolver,
            rate_limit,
            rate_window_seconds,
        }
    }

    /// Creates a short URL for `owner_id`.
    ///
    /// # Rate Limiting
    ///
    /// Writes are gated per owner. A failure of the counting backend rejects
    /// the request (fail-closed): silently allowing unlimited writes would be
    /// worse than turning away traffic while the backend recovers.
    ///
    /// # Collisions
    ///
    /// The generated code's uniqueness is enforced by the owning shard's
    /// constraint; a collision surfaces as [`AppError::WriteFailure`] and is
    /// not retried here.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed or non-HTTP(S) target URL
    /// - [`AppError::RateLimited`] when the owner exceeded the window's limit
    /// - [`AppError::Backend`] when the rate-limit backend failed
    /// - [`AppError::WriteFailure`] when the shard insert failed
    pub async fn create_short_url(
        &self,
        owner_id: i64,
        target_url: &str,
    ) -> Result<ShortUrl, AppError> {
        let normalized = validate_target_url(target_url)?;

        let allowed = self
            .limiter
            .allow(
                &format!("shorten:{}", owner_id),
                self.rate_limit,
                self.rate_window_seconds,
            )
            .await?;

        if !allowed {
            return Err(AppError::rate_limited(
                "Rate limit exceeded",
                json!({ "owner_id": owner_id, "limit": self.rate_limit }),
            ));
        }

        let code = generate_code();
        let url = self.router.create_url(owner_id, &code, &normalized).await?;

        self.resolver
            .prime_after_create(&url.code, &url.target_url)
            .await;

        info!(owner_id, code = %url.code, "short url created");
        Ok(url)
    }
}
