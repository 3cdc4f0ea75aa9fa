//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the external collaborators of the core, following
//! the Repository pattern. Concrete implementations live in
//! `crate::infrastructure`.
//!
//! # Available Traits
//!
//! - [`UrlShard`] - A single relational shard (insert + code lookup)
//! - [`CounterStore`] - Atomic counters backing the rate limiter
//! - [`ClickStore`] - Document store for persisted click events
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` under `cfg(test)`.

pub mod click_store;
pub mod counter_store;
pub mod url_shard;

pub use click_store::{ClickStore, StoreError};
pub use counter_store::{CounterError, CounterStore};
pub use url_shard::UrlShard;

#[cfg(test)]
pub use click_store::MockClickStore;
#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use url_shard::MockUrlShard;
