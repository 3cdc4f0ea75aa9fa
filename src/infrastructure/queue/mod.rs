//! Durable AMQP queue for click events.
//!
//! The publisher side hands events to the broker with persistent delivery so
//! an accepted message survives a broker restart; acceptance itself is not
//! guaranteed (at-most-once publisher→broker). The consumer side acknowledges
//! only after a successful insert into the document store (at-least-once
//! broker→consumer).

pub mod consumer;
pub mod publisher;
pub mod rabbit;

pub use consumer::{Disposition, handle_payload, run_click_consumer};
pub use publisher::{CLICK_QUEUE, ClickPublisher, PublishError};
pub use rabbit::RabbitClickQueue;

#[cfg(test)]
pub use publisher::MockClickPublisher;
