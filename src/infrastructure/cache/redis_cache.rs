//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Connects to Redis and validates the connection with a PING.
///
/// The returned [`ConnectionManager`] is cheap to clone and shared between
/// the cache and the rate-limit counter store; it is created once at process
/// start and reused for the process lifetime.
///
/// # Errors
///
/// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
/// connection cannot be established, or the PING health check fails.
pub async fn connect(redis_url: &str) -> CacheResult<ConnectionManager> {
    let client = Client::open(redis_url).map_err(|e| {
        CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
    })?;

    let manager = ConnectionManager::new(client)
        .await
        .map_err(|e| CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e)))?;

    let mut test_conn = manager.clone();
    test_conn
        .ping::<()>()
        .await
        .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

    info!("✓ Connected to Redis");

    Ok(manager)
}

/// Redis cache implementation for fast URL lookups.
///
/// All operations are fail-open: errors are logged but don't propagate to
/// callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Wraps a shared connection and configures the default TTL.
    ///
    /// `default_ttl_seconds` is applied to cached entries when
    /// [`CacheService::set_url`] is called with `ttl_seconds = None`;
    /// controlled via the `CACHE_TTL_SECONDS` env var.
    pub fn new(client: ConnectionManager, default_ttl_seconds: u64) -> Self {
        Self {
            client,
            default_ttl: default_ttl_seconds,
            key_prefix: "code:".to_string(),
        }
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, code: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {} -> {}", code, url);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", code);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", code, e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        code: &str,
        target_url: &str,
        ttl: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        match conn.set_ex::<_, _, ()>(&key, target_url, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} -> {} (TTL: {}s)", code, target_url, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", code, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
