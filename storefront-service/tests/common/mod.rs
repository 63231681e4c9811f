#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use storefront_service::config::{CorsConfig, MongoConfig, StorefrontConfig};
use storefront_service::services::{DocumentGateway, InMemoryStore};
use storefront_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("storefront_test_{}", uuid::Uuid::new_v4().simple()),
            uri_from_env: true,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
        log_level: "error".to_string(),
        otlp_endpoint: None,
    }
}

impl TestApp {
    /// Router over a fresh in-memory store.
    pub fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState {
            config: test_config(),
            gateway: DocumentGateway::new(store.clone()),
        };

        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    /// Create a product and return its id.
    pub async fn create_product(&self, title: &str, price: f64, category: &str) -> String {
        let (status, body) = self
            .post(
                "/api/products",
                json!({ "title": title, "price": price, "category": category }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

pub fn checkout_body(email: &str, items: Value) -> Value {
    json!({
        "customer_name": "Asha Rao",
        "customer_email": email,
        "customer_phone": "+91 98765 43210",
        "shipping_address": "12 MG Road, Bengaluru",
        "items": items,
    })
}
