//! Caching layer for fast redirect lookups, plus rate-limit counters.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! The same Redis connection also backs [`RedisCounterStore`], the atomic
//! counter store used by the rate limiter. The two deliberately differ in
//! error policy: cache operations fail open (degrade to a miss), counter
//! operations fail loud so the write path can fail closed.

mod null_cache;
mod redis_cache;
mod redis_counter;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::{RedisCache, connect};
pub use redis_counter::RedisCounterStore;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
