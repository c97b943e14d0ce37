// src/lib.rs
//! Bridges `GET /checkout` requests onto the `checkout.events` RabbitMQ queue.

pub mod api;
pub mod env;
pub mod message;
pub mod rabbitmq;
