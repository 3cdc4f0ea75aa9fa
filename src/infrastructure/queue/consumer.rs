//! Consumer loop persisting click events to the document store.
//!
//! Each message goes through `Received -> Processing -> {Acked | Requeued |
//! Discarded}`. A message is acknowledged (removed from the queue
//! permanently) only after a successful insert; a persistence failure is
//! negatively acknowledged with requeue so the broker redelivers it.
//! Retries are uncapped on persistence failures, which are assumed
//! transient. A payload that fails to deserialize, by contrast, can never
//! succeed and is discarded without requeue so a poison message cannot loop
//! forever.

use std::sync::Arc;

use futures_util::StreamExt;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicQosOptions};
use lapin::types::FieldTable;
use tracing::{debug, error};

use super::publisher::CLICK_QUEUE;
use super::rabbit::RabbitClickQueue;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickStore;

/// What to do with a delivery after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Insert succeeded; remove the message from the queue.
    Ack,
    /// Transient persistence failure; redeliver.
    Requeue,
    /// Permanently malformed payload; drop without redelivery.
    Discard,
}

/// Processes one raw delivery: deserialize, persist, decide.
pub async fn handle_payload(payload: &[u8], store: &dyn ClickStore) -> Disposition {
    let event: ClickEvent = match serde_json::from_slice(payload) {
        Ok(event) => event,
        Err(e) => {
            error!("discarding malformed click event: {}", e);
            return Disposition::Discard;
        }
    };

    match store.insert(&event).await {
        Ok(()) => {
            debug!(code = %event.code, "click event persisted");
            Disposition::Ack
        }
        Err(e) => {
            error!(code = %event.code, "click insert failed, requeueing: {}", e);
            Disposition::Requeue
        }
    }
}

/// Runs the consume loop until the broker connection drops.
///
/// Prefetch is 1: one in-flight message is processed and settled before the
/// next is delivered, trading throughput for simple per-consumer ordering.
/// Multiple worker processes may run in parallel with no ordering guarantee
/// across them.
///
/// # Errors
///
/// Returns an error when the channel fails; the caller decides whether to
/// reconnect or exit.
pub async fn run_click_consumer(
    queue: &RabbitClickQueue,
    store: Arc<dyn ClickStore>,
) -> anyhow::Result<()> {
    let channel = queue.channel();

    channel.basic_qos(1, BasicQosOptions::default()).await?;

    let mut consumer = channel
        .basic_consume(
            CLICK_QUEUE,
            "click-worker",
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await?;

    while let Some(delivery) = consumer.next().await {
        let delivery = delivery?;

        match handle_payload(&delivery.data, store.as_ref()).await {
            Disposition::Ack => delivery.ack(BasicAckOptions::default()).await?,
            Disposition::Requeue => {
                delivery
                    .nack(BasicNackOptions {
                        multiple: false,
                        requeue: true,
                    })
                    .await?
            }
            Disposition::Discard => {
                delivery
                    .nack(BasicNackOptions {
                        multiple: false,
                        requeue: false,
                    })
                    .await?
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockClickStore, StoreError};

    fn sample_payload() -> Vec<u8> {
        let event = ClickEvent::new(
            "abc12345".to_string(),
            Some(42),
            Some("10.0.0.1".to_string()),
            Some("TestBot/1.0"),
        );
        serde_json::to_vec(&event).unwrap()
    }

    #[tokio::test]
    async fn test_successful_insert_is_acked() {
        let mut store = MockClickStore::new();
        store
            .expect_insert()
            .withf(|ev| ev.code == "abc12345" && ev.url_id == Some(42))
            .times(1)
            .returning(|_| Ok(()));

        let disposition = handle_payload(&sample_payload(), &store).await;

        assert_eq!(disposition, Disposition::Ack);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_requeued() {
        let mut store = MockClickStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Backend("primary stepped down".to_string())));

        let disposition = handle_payload(&sample_payload(), &store).await;

        assert_eq!(disposition, Disposition::Requeue);
    }

    #[tokio::test]
    async fn test_transient_failure_then_success_persists_exactly_like_redelivery() {
        // Simulates the broker redelivering after a requeue: the same payload
        // is processed again and must eventually be acked.
        let mut store = MockClickStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::Backend("timeout".to_string())));
        store
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let payload = sample_payload();

        assert_eq!(handle_payload(&payload, &store).await, Disposition::Requeue);
        assert_eq!(handle_payload(&payload, &store).await, Disposition::Ack);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_discarded_without_insert() {
        let mut store = MockClickStore::new();
        store.expect_insert().times(0);

        let disposition = handle_payload(b"{not json", &store).await;

        assert_eq!(disposition, Disposition::Discard);
    }
}
