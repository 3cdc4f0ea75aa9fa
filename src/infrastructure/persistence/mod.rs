//! Storage backend implementations.
//!
//! Concrete implementations of the domain data-access traits:
//!
//! - [`PgUrlShard`] - One PostgreSQL shard (rw/ro pool pair) holding URL rows
//! - [`MongoClickStore`] - MongoDB collection persisting click documents

pub mod mongo_click_store;
pub mod pg_url_shard;

pub use mongo_click_store::MongoClickStore;
pub use pg_url_shard::PgUrlShard;
