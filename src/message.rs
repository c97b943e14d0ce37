// src/message.rs

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing userId or amount")]
    MissingField,
}

/// A checkout request as it travels over the queue.
///
/// `amount` is carried verbatim; no numeric parsing happens anywhere on
/// the publish path.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CheckoutEvent {
    amount: String,
    #[serde(rename = "userId")]
    user_id: String,
}

impl CheckoutEvent {
    /// Creates an event, rejecting empty fields.
    pub fn new(
        user_id: impl Into<String>,
        amount: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let user_id = user_id.into();
        let amount = amount.into();

        if user_id.is_empty() || amount.is_empty() {
            return Err(ValidationError::MissingField);
        }

        Ok(CheckoutEvent { amount, user_id })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// JSON body published to the queue.
    pub fn to_payload(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
