//! Trait for the atomic counters backing the rate limiter.

use async_trait::async_trait;

/// Errors that can occur against the counting backend.
///
/// Kept distinct from "limit exceeded" so callers can choose a fail-open or
/// fail-closed policy. The create path fails closed (see
/// [`crate::application::services::ShortenService`]).
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("counter backend error: {0}")]
    Backend(String),
}

/// Single-key atomic counters with expiry.
///
/// The increment must be atomic so that a post-increment value of exactly 1
/// is a reliable "I am the first writer in this window" signal.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCounterStore`] - Redis INCR/EXPIRE
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increments the counter at `key`, creating it at 1 if
    /// absent, and returns the post-increment value.
    async fn incr(&self, key: &str) -> Result<i64, CounterError>;

    /// Arms the expiry of `key` so the counter disappears with its window.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), CounterError>;
}
