// src/api/error.rs
//! Maps checkout failures onto HTTP responses.
//!
//! Bodies are plain text, matching the messages clients already parse.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::message::ValidationError;
use crate::rabbitmq::RabbitMQError;

pub const MISSING_PARAMETERS: &str = "Missing userId or amount";
pub const PUBLISH_FAILED: &str = "Failed to publish event";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Publish(#[from] RabbitMQError),
}

impl CheckoutError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Validation(_) => MISSING_PARAMETERS,
            Self::Publish(_) => PUBLISH_FAILED,
        };
        (self.status(), body).into_response()
    }
}
