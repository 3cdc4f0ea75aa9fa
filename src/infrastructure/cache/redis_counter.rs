//! Redis-backed atomic counters for the rate limiter.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::domain::repositories::{CounterError, CounterStore};

/// Counter store over Redis INCR/EXPIRE.
///
/// Redis INCR is atomic at the single-key level, making a post-increment
/// value of 1 a reliable first-writer signal. Unlike [`super::RedisCache`],
/// errors here propagate: the rate limiter must be able to tell a backend
/// failure apart from an over-limit caller.
pub struct RedisCounterStore {
    client: ConnectionManager,
}

impl RedisCounterStore {
    pub fn new(client: ConnectionManager) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr(&self, key: &str) -> Result<i64, CounterError> {
        let mut conn = self.client.clone();

        conn.incr::<_, _, i64>(key, 1i64)
            .await
            .map_err(|e| CounterError::Backend(format!("INCR {} failed: {}", key, e)))
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), CounterError> {
        let mut conn = self.client.clone();

        conn.expire::<_, ()>(key, ttl_seconds as i64)
            .await
            .map_err(|e| CounterError::Backend(format!("EXPIRE {} failed: {}", key, e)))
    }
}
