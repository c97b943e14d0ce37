use checkout_publisher::env::Config;
use checkout_publisher::message::CheckoutEvent;
use checkout_publisher::rabbitmq::{
    declare_queue, Connector, EventPublisher, QueuePublisher, QueueSpec, RabbitMQError,
};

fn unreachable_config() -> Config {
    Config {
        rabbitmq_host: "127.0.0.1".to_string(),
        rabbitmq_connect_timeout_seconds: 5,
        ..Config::default()
    }
}

// Port 5672 on localhost with nothing listening is refused immediately.
#[tokio::test]
#[ignore] // Ignore by default: fails differently when a local broker is running
async fn test_unreachable_broker_fails_startup() {
    let result = Connector::establish(&unreachable_config()).await;

    match result {
        Err(RabbitMQError::ConnectionError(_)) | Err(RabbitMQError::TimeoutError(_)) => {}
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("startup should fail without a broker"),
    }
}

#[tokio::test]
#[ignore] // Ignore by default as it requires a running RabbitMQ instance
async fn test_establish_declare_and_publish() {
    let config = Config::load().expect("Failed to load config");

    let (connector, channel) = Connector::establish(&config)
        .await
        .expect("Failed to establish broker connection");

    // A second declaration with identical properties is accepted
    declare_queue(&channel, &QueueSpec::checkout_events())
        .await
        .expect("Redeclaring the queue should be idempotent");

    let publisher = QueuePublisher::new(channel);
    let event = CheckoutEvent::new("u123", "49.99").unwrap();
    publisher.publish(&event).await.expect("Failed to publish");

    connector.close().await.expect("Failed to close connection");
}

#[tokio::test]
#[ignore] // Ignore by default as it requires a running RabbitMQ instance
async fn test_incompatible_declaration_is_rejected() {
    let config = Config::load().expect("Failed to load config");
    let (connector, channel) = Connector::establish(&config).await.unwrap();

    let mismatched = QueueSpec {
        durable: false,
        ..QueueSpec::checkout_events()
    };
    let result = declare_queue(&channel, &mismatched).await;

    assert!(matches!(result, Err(RabbitMQError::DeclarationError(_))));
    connector.close().await.ok();
}
