//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock discovery gateway injected, so the full HTTP surface can be
//! exercised without a running discovery service.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use leadfinder_core::{testing::MockGateway, Config, LeadGateway};
use leadfinder_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use leadfinder_core::testing::fixtures;

/// Test fixture for E2E testing with a mock gateway.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.gateway.set_batch(fixtures::batch(vec![fixtures::lead("alice", 3)], &[])).await;
///
///     let response = fixture.post("/api/v1/search", json!({ "query": "ai tools" })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock gateway - configure discovery service answers
    pub gateway: Arc<MockGateway>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body text
    pub text: String,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let gateway = Arc::new(MockGateway::new());
        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&gateway) as Arc<dyn LeadGateway>,
        ));

        Self {
            router: create_router(state),
            gateway,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
