// src/main.rs

use std::sync::Arc;

use anyhow::{Context, Result};
use checkout_publisher::api::{create_router, AppState};
use checkout_publisher::env::Config;
use checkout_publisher::rabbitmq::{Connector, QueuePublisher};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing for logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,checkout_publisher=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    info!(?config, "Configuration loaded");

    // Broker setup must succeed before the port is bound
    let (connector, channel) = Connector::establish(&config)
        .await
        .context("RabbitMQ startup failed")?;

    let publisher = QueuePublisher::new(channel);
    info!(publish_target = ?publisher.target(), "Publisher ready");

    let app = create_router(AppState::new(Arc::new(publisher))).layer(TraceLayer::new_for_http());

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Checkout service starting on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    connector.close().await?;
    info!("Checkout service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
