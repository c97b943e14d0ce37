// src/rabbitmq/mod.rs
// Broker side of the service: connection setup and publishing

pub mod connection;
pub mod errors;
pub mod publisher;

// Re-export specific items to simplify imports elsewhere
pub use connection::{declare_queue, Connector, QueueSpec, CHECKOUT_QUEUE};
pub use errors::{RabbitMQError, Result};
pub use publisher::{EventPublisher, PublishTarget, QueuePublisher, DEFAULT_EXCHANGE};
