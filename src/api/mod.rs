// src/api/mod.rs
//! HTTP surface of the service.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /checkout | [`checkout::checkout`] |
//! | GET | /health | [`health_check`] |

pub mod checkout;
pub mod error;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::rabbitmq::EventPublisher;

/// Shared state handed to every handler.
///
/// Wraps the single publisher created at startup; cloning only bumps the
/// reference count.
#[derive(Clone)]
pub struct AppState {
    publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.publisher
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/checkout", get(checkout::checkout))
        .route("/health", get(health_check))
        .with_state(state)
}
