//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

pub mod mock_smtp;

use axum::body::Body;
use axum::http::{Request, Response};
use mailrelay_api::ApiContext;
use mailrelay_core::{EmailResponse, RelayConfig};
use mock_smtp::{MockFactory, Outcome};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_API_KEY: &str = "beckk001";

/// Context whose transports behave according to the given outcomes
pub fn test_context(verify: Outcome, send: Outcome) -> (Arc<ApiContext>, MockFactory) {
    let factory = MockFactory::new(verify, send);
    let config = RelayConfig::builder()
        .api_key(TEST_API_KEY)
        .smtp_timeout(Duration::from_millis(100))
        .build();

    (
        ApiContext::with_factory(config, Arc::new(factory.clone())),
        factory,
    )
}

/// A complete, valid request body
pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "api_key": TEST_API_KEY,
        "to": "a@b.com",
        "subject": "Hi",
        "body": "Line1\nLine2",
        "from_email": "x@gmail.com",
        "from_password": "app-pass"
    })
}

pub fn json_request(method: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/api/send-email")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub fn raw_request(method: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/api/send-email")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn read_json(response: Response<Body>) -> EmailResponse {
    serde_json::from_slice(&read_body(response).await).unwrap()
}
