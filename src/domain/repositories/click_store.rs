//! Trait for the document store persisting click events.

use crate::domain::click_event::ClickEvent;
use async_trait::async_trait;

/// Errors that can occur while persisting a click event.
///
/// Treated as transient by the consumer: a failed insert is requeued and
/// retried, never dropped.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store error: {0}")]
    Backend(String),
}

/// Append-only store for click documents.
///
/// Inserts may be observed more than once for the same event under failure
/// (at-least-once delivery, no dedup key).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MongoClickStore`] - MongoDB implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickStore: Send + Sync {
    async fn insert(&self, event: &ClickEvent) -> Result<(), StoreError>;
}
