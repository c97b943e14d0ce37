use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use checkout_publisher::api::{create_router, AppState};
use checkout_publisher::message::CheckoutEvent;
use checkout_publisher::rabbitmq::{EventPublisher, Result};
use http_body_util::BodyExt;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use proptest::prelude::*;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<CheckoutEvent>>,
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &CheckoutEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

async fn checkout(
    user_id: &str,
    amount: &str,
) -> (StatusCode, serde_json::Value, Vec<CheckoutEvent>) {
    let publisher = Arc::new(RecordingPublisher::default());
    let router = create_router(AppState::new(publisher.clone()));

    let uri = format!(
        "/checkout?userId={}&amount={}",
        utf8_percent_encode(user_id, NON_ALPHANUMERIC),
        utf8_percent_encode(amount, NON_ALPHANUMERIC)
    );
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    let events = publisher.events.lock().unwrap().clone();

    (status, json, events)
}

#[tokio::test]
async fn test_checkout_round_trip() {
    let (status, json, events) = checkout("u123", "49.99").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"status": "success", "event": {"amount": "49.99", "userId": "u123"}})
    );
    assert_eq!(events, vec![CheckoutEvent::new("u123", "49.99").unwrap()]);
}

proptest! {
    #[test]
    fn any_non_empty_parameters_are_echoed(user_id in "\\PC{1,24}", amount in "\\PC{1,12}") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (status, json, events) = runtime.block_on(checkout(&user_id, &amount));

        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(json["status"].as_str(), Some("success"));
        prop_assert_eq!(json["event"]["userId"].as_str(), Some(user_id.as_str()));
        prop_assert_eq!(json["event"]["amount"].as_str(), Some(amount.as_str()));
        prop_assert_eq!(events.len(), 1);
    }
}
