//! Cache-aside resolution of short codes.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::application::router::ShardRouter;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Outcome of a successful resolution.
///
/// `url_id` is `None` when the target came from cache: the resolver does not
/// look up the row id on a hit, an accepted trade-off for speed that flows
/// into `ClickEvent.url_id` being null.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub target_url: String,
    pub url_id: Option<i64>,
}

/// Read-through cache in front of the shard pool.
///
/// Cache entries are advisory: absence never implies non-existence, and
/// presence is trusted for at most the configured TTL. Cache failures degrade
/// to a miss and fall through to the shards; they never fail the resolve.
pub struct ResolveService {
    cache: Arc<dyn CacheService>,
    router: Arc<ShardRouter>,
    cache_ttl_seconds: u64,
}

impl ResolveService {
    pub fn new(
        cache: Arc<dyn CacheService>,
        router: Arc<ShardRouter>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            cache,
            router,
            cache_ttl_seconds,
        }
    }

    /// Resolves a code to its target URL, cache first.
    ///
    /// On a miss the shards are consulted in fan-out order and the cache is
    /// repopulated with the configured TTL (best effort).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no shard holds the code, and
    /// [`AppError::Backend`] when a shard read failed before the code was
    /// found. A shard outage within the TTL of a cached entry is invisible to
    /// callers.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        match self.cache.get_url(code).await {
            Ok(Some(target_url)) => {
                return Ok(Resolution {
                    target_url,
                    url_id: None,
                });
            }
            Ok(None) => {}
            Err(e) => {
                warn!(code, "cache read failed, falling back to shards: {}", e);
            }
        }

        let Some(url) = self.router.get_by_code(code).await? else {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        };

        if let Err(e) = self
            .cache
            .set_url(code, &url.target_url, Some(self.cache_ttl_seconds))
            .await
        {
            warn!(code, "failed to repopulate cache: {}", e);
        }

        Ok(Resolution {
            target_url: url.target_url,
            url_id: Some(url.id),
        })
    }

    /// Pre-populates the cache right after a successful create, avoiding a
    /// guaranteed miss on the first redirect. Best effort.
    pub async fn prime_after_create(&self, code: &str, target_url: &str) {
        if let Err(e) = self
            .cache
            .set_url(code, target_url, Some(self.cache_ttl_seconds))
            .await
        {
            warn!(code, "failed to prime cache after create: {}", e);
        }
    }
}
