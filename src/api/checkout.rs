// src/api/checkout.rs
//! `GET /checkout` handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use super::error::CheckoutError;
use super::AppState;
use crate::message::{CheckoutEvent, ValidationError};

/// Query string of a checkout request. Both keys are optional at the
/// decoding stage so that absence is reported as a validation failure.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckoutQuery {
    pub user_id: Option<String>,
    pub amount: Option<String>,
}

impl CheckoutQuery {
    /// Picks `userId` and `amount` out of decoded query pairs. When a key
    /// repeats, the first occurrence wins and the rest are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = CheckoutQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "userId" => &mut query.user_id,
                "amount" => &mut query.amount,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: &'static str,
    pub event: CheckoutEvent,
}

/// GET /checkout?userId=<string>&amount=<string>
///
/// - `200 OK` with `{"status":"success","event":{...}}` once published
/// - `400 Bad Request` if either parameter is missing or empty
/// - `500 Internal Server Error` if the broker rejected the publish
pub async fn checkout(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<CheckoutResponse>, CheckoutError> {
    let event = build_event(query)?;

    state.publisher().publish(&event).await.map_err(|e| {
        error!(user_id = event.user_id(), "Failed to publish event: {}", e);
        CheckoutError::from(e)
    })?;

    Ok(Json(CheckoutResponse {
        status: "success",
        event,
    }))
}

fn build_event(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<CheckoutEvent, ValidationError> {
    let Query(pairs) = query.map_err(|rejection| {
        debug!("Rejected checkout query: {}", rejection);
        ValidationError::MissingField
    })?;
    let query = CheckoutQuery::from_pairs(pairs);

    match (query.user_id, query.amount) {
        (Some(user_id), Some(amount)) => CheckoutEvent::new(user_id, amount),
        _ => Err(ValidationError::MissingField),
    }
}
