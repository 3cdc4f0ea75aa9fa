//! Click publisher trait and error types.

use async_trait::async_trait;

use crate::domain::click_event::ClickEvent;

/// Name of the durable queue carrying click events.
pub const CLICK_QUEUE: &str = "click_events";

/// Errors that can occur while publishing a click event.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("broker error: {0}")]
    Broker(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// Trait for handing click events to the durable queue.
///
/// Called only from the background publisher task
/// ([`crate::domain::click_worker::run_click_publisher`]); request handlers
/// never publish directly, so a slow broker cannot slow a redirect.
///
/// # Implementations
///
/// - [`crate::infrastructure::queue::RabbitClickQueue`] - AMQP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickPublisher: Send + Sync {
    /// Publishes one event with persistent delivery.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the event cannot be encoded or the
    /// broker rejects it. The caller logs and drops; a publish failure is a
    /// documented data-loss mode, never surfaced to HTTP callers.
    async fn publish(&self, event: &ClickEvent) -> Result<(), PublishError>;
}
