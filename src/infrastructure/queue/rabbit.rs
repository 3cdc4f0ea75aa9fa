//! AMQP implementation of the click queue.

use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties,
    options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions},
    publisher_confirm::Confirmation,
    types::FieldTable,
};
use tracing::info;

use super::publisher::{CLICK_QUEUE, ClickPublisher, PublishError};
use crate::domain::click_event::ClickEvent;

/// Persistent delivery mode per AMQP 0.9.1 (survives broker restart).
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Connection and channel to the click-event queue.
///
/// Declared durable on connect so that messages accepted by the broker
/// survive a restart. The connection and channel are created once at process
/// start and live for the process lifetime.
pub struct RabbitClickQueue {
    // Held so the channel's connection stays open.
    _connection: Connection,
    channel: Channel,
}

impl RabbitClickQueue {
    /// Connects to the broker and declares the durable click queue.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Broker`] when the broker is unreachable or the
    /// queue cannot be declared.
    pub async fn connect(amqp_url: &str) -> Result<Self, PublishError> {
        let connection = Connection::connect(amqp_url, ConnectionProperties::default())
            .await
            .map_err(|e| PublishError::Broker(format!("Failed to connect to broker: {}", e)))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| PublishError::Broker(format!("Failed to open channel: {}", e)))?;

        // Publisher confirms: without them the broker may silently drop a
        // message accepted on the wire.
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|e| {
                PublishError::Broker(format!("Failed to enable publisher confirms: {}", e))
            })?;

        channel
            .queue_declare(
                CLICK_QUEUE,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| PublishError::Broker(format!("Failed to declare queue: {}", e)))?;

        info!("✓ Connected to broker, queue '{}' declared", CLICK_QUEUE);

        Ok(Self {
            _connection: connection,
            channel,
        })
    }

    /// The underlying channel, used by the consumer loop.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}

/// Maps a broker confirmation to the publish outcome.
///
/// A nack means the broker could not take responsibility for the message
/// (e.g., queue unavailable); the caller treats it like any other publish
/// failure and drops the event.
fn check_confirmation(confirmation: Confirmation) -> Result<(), PublishError> {
    match confirmation {
        Confirmation::Nack(_) => Err(PublishError::Broker(
            "Broker refused the message (nack)".to_string(),
        )),
        Confirmation::Ack(_) | Confirmation::NotRequested => Ok(()),
    }
}

#[async_trait]
impl ClickPublisher for RabbitClickQueue {
    async fn publish(&self, event: &ClickEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event).map_err(|e| PublishError::Encode(e.to_string()))?;

        let confirmation = self
            .channel
            .basic_publish(
                "",
                CLICK_QUEUE,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_delivery_mode(DELIVERY_MODE_PERSISTENT),
            )
            .await
            .map_err(|e| PublishError::Broker(format!("Publish failed: {}", e)))?
            .await
            .map_err(|e| PublishError::Broker(format!("Broker did not accept message: {}", e)))?;

        check_confirmation(confirmation)
    }
}
