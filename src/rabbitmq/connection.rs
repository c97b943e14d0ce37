// src/rabbitmq/connection.rs

use std::time::Duration;

use lapin::{options::*, types::FieldTable, Channel, Connection, ConnectionProperties};
use tokio::time::timeout;
use tracing::{debug, error, info};

use super::errors::{RabbitMQError, Result};
use crate::env::Config;

/// Queue every checkout event is routed to.
pub const CHECKOUT_QUEUE: &str = "checkout.events";

/// Properties asserted when the queue is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: String,
    pub durable: bool,
    pub exclusive: bool,
    pub auto_delete: bool,
}

impl QueueSpec {
    pub fn checkout_events() -> Self {
        Self {
            name: CHECKOUT_QUEUE.to_string(),
            durable: true,
            exclusive: false,
            auto_delete: false,
        }
    }

    pub fn declare_options(&self) -> QueueDeclareOptions {
        QueueDeclareOptions {
            durable: self.durable,
            exclusive: self.exclusive,
            auto_delete: self.auto_delete,
            ..QueueDeclareOptions::default()
        }
    }
}

/// Owns the single broker connection for the lifetime of the process.
///
/// There is no reconnect logic: if the connection drops, publishes start
/// failing and each request reports the failure.
pub struct Connector {
    connection: Connection,
}

impl Connector {
    /// Opens a connection to `dsn`, giving up after `connect_timeout`.
    pub async fn connect(dsn: &str, connect_timeout: Duration) -> Result<Self> {
        debug!(timeout = ?connect_timeout, "Connecting to RabbitMQ");

        let connection = timeout(
            connect_timeout,
            Connection::connect(dsn, ConnectionProperties::default()),
        )
        .await?
        .map_err(|e| RabbitMQError::ConnectionError(e.to_string()))?;

        info!("Successfully connected to RabbitMQ");
        Ok(Self { connection })
    }

    pub async fn open_channel(&self) -> Result<Channel> {
        let channel = self
            .connection
            .create_channel()
            .await
            .map_err(|e| RabbitMQError::ChannelError(e.to_string()))?;

        debug!(channel_id = channel.id(), "Opened channel");
        Ok(channel)
    }

    /// Connects, opens the shared channel and declares the checkout queue.
    ///
    /// Any failure here is fatal; the caller is expected to exit before
    /// binding the HTTP listener.
    pub async fn establish(config: &Config) -> Result<(Self, Channel)> {
        info!(
            host = %config.rabbitmq_host,
            user = %config.rabbitmq_user,
            "Attempting to connect to RabbitMQ"
        );

        let connector = Self::connect(&config.amqp_addr(), config.connect_timeout())
            .await
            .inspect_err(|e| error!("Failed to connect to RabbitMQ. error: {}", e))?;

        let channel = connector
            .open_channel()
            .await
            .inspect_err(|e| error!("Failed to open a channel: {}", e))?;

        declare_queue(&channel, &QueueSpec::checkout_events())
            .await
            .inspect_err(|e| error!("Failed to declare a queue: {}", e))?;

        info!("Successfully connected to RabbitMQ and declared queue.");
        Ok((connector, channel))
    }

    pub fn is_connected(&self) -> bool {
        self.connection.status().connected()
    }

    // Method for properly closing the connection on shutdown
    pub async fn close(self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        info!("Closing RabbitMQ connection gracefully");
        self.connection
            .close(0, "Closing connection")
            .await
            .map_err(|e| RabbitMQError::ConnectionError(e.to_string()))
    }
}

/// Declares `spec` on `channel`.
///
/// Redeclaring with identical properties is a no-op on the broker; a queue
/// that already exists with different properties is rejected.
pub async fn declare_queue(channel: &Channel, spec: &QueueSpec) -> Result<()> {
    let queue = channel
        .queue_declare(&spec.name, spec.declare_options(), FieldTable::default())
        .await
        .map_err(|e| RabbitMQError::DeclarationError(format!("{}: {}", spec.name, e)))?;

    info!(
        "Queue '{}' declared with {} messages",
        spec.name,
        queue.message_count()
    );
    Ok(())
}
