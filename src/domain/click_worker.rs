//! Non-blocking click hand-off and the background publisher loop.
//!
//! The redirect path never waits on the broker: events go into a bounded
//! in-process queue and a background task drains it, publishing each event to
//! the durable queue. A full queue or a failed publish loses the click and is
//! logged; click recording never affects the HTTP outcome.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::infrastructure::queue::ClickPublisher;

/// Cheap, cloneable handle for recording clicks from request handlers.
#[derive(Clone)]
pub struct ClickRecorder {
    tx: mpsc::Sender<ClickEvent>,
}

impl ClickRecorder {
    pub fn new(tx: mpsc::Sender<ClickEvent>) -> Self {
        Self { tx }
    }

    /// Hands a click event off to the publisher task without blocking.
    ///
    /// When the queue is full or the publisher has shut down the event is
    /// dropped. This is the documented data-loss mode of the pipeline, not a
    /// crash condition.
    pub fn record(&self, event: ClickEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => {
                warn!(code = %ev.code, "click queue full, dropping event");
            }
            Err(TrySendError::Closed(ev)) => {
                warn!(code = %ev.code, "click publisher stopped, dropping event");
            }
        }
    }
}

/// Drains the in-process queue and publishes each event to the broker.
///
/// Runs until every [`ClickRecorder`] handle is dropped. A publish failure is
/// logged and the event is lost; the loop itself never stops on error
/// (at-most-once from publisher to broker).
pub async fn run_click_publisher(
    mut rx: mpsc::Receiver<ClickEvent>,
    publisher: Arc<dyn ClickPublisher>,
) {
    while let Some(event) = rx.recv().await {
        match publisher.publish(&event).await {
            Ok(()) => debug!(code = %event.code, "click event published"),
            Err(e) => warn!(code = %event.code, "failed to publish click event: {}", e),
        }
    }

    debug!("click publisher loop stopped");
}
