// src/rabbitmq/publisher.rs

use async_trait::async_trait;
use lapin::{options::BasicPublishOptions, BasicProperties, Channel};
use tracing::info;
use uuid::Uuid;

use super::connection::CHECKOUT_QUEUE;
use super::errors::{RabbitMQError, Result};
use crate::message::CheckoutEvent;

/// Nameless default exchange: routes by queue name.
pub const DEFAULT_EXCHANGE: &str = "";

/// Where and how a message is addressed on `basic_publish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishTarget {
    pub exchange: &'static str,
    pub routing_key: &'static str,
    pub mandatory: bool,
    pub immediate: bool,
}

impl PublishTarget {
    /// Direct-to-queue delivery onto `checkout.events`, without the
    /// mandatory or immediate flags.
    pub fn checkout_queue() -> Self {
        Self {
            exchange: DEFAULT_EXCHANGE,
            routing_key: CHECKOUT_QUEUE,
            mandatory: false,
            immediate: false,
        }
    }

    pub fn options(&self) -> BasicPublishOptions {
        BasicPublishOptions {
            mandatory: self.mandatory,
            immediate: self.immediate,
        }
    }
}

/// Something that can hand a checkout event to the broker.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &CheckoutEvent) -> Result<()>;
}

/// Publishes onto the checkout queue through the default exchange.
///
/// Holds a clone of the process-wide channel; lapin channels accept
/// concurrent `basic_publish` calls, so no lock is taken here.
#[derive(Clone)]
pub struct QueuePublisher {
    channel: Channel,
    target: PublishTarget,
}

impl QueuePublisher {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            target: PublishTarget::checkout_queue(),
        }
    }

    pub fn target(&self) -> &PublishTarget {
        &self.target
    }
}

pub(crate) fn message_properties() -> BasicProperties {
    BasicProperties::default()
        .with_content_type("application/json".into())
        .with_message_id(Uuid::new_v4().to_string().into())
        .with_timestamp(chrono::Utc::now().timestamp() as u64)
}

#[async_trait]
impl EventPublisher for QueuePublisher {
    async fn publish(&self, event: &CheckoutEvent) -> Result<()> {
        let payload = event.to_payload()?;
        let target = self.target;

        // The confirm future is dropped: delivery is fire-and-forget.
        self.channel
            .basic_publish(
                target.exchange,
                target.routing_key,
                target.options(),
                &payload,
                message_properties(),
            )
            .await
            .map_err(|e| RabbitMQError::PublishError(e.to_string()))?;

        info!("Published message: {}", String::from_utf8_lossy(&payload));
        Ok(())
    }
}
