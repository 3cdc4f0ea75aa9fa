//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for the shards, the cache, the broker, and the
//! document store.
//!
//! # Modules
//!
//! - [`cache`] - Redis-backed cache and rate-limit counters (plus a no-op cache)
//! - [`persistence`] - PostgreSQL shard and MongoDB click store
//! - [`queue`] - Durable AMQP click queue (publisher and consumer)

pub mod cache;
pub mod persistence;
pub mod queue;
