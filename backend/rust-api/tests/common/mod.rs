#![allow(dead_code)]

use adaptive_learning_api::{
    config::Config,
    create_router,
    services::{
        seed::{self, SeedData},
        AppState,
    },
    store::{InMemoryStore, RecordStore},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn RecordStore>,
}

pub fn test_config() -> Config {
    Config {
        jwt_secret: "integration-test-secret".to_string(),
        password_hash_cost: 4,
        ..Config::default()
    }
}

/// Router over a store seeded with the demo users, catalog and questions.
pub async fn create_test_app() -> TestApp {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let config = test_config();
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::new());
    seed::apply(
        SeedData::demo().expect("demo seed should parse"),
        &config,
        store.as_ref(),
    )
    .await
    .expect("Failed to seed test store");

    let app_state = Arc::new(AppState::new(config, store.clone()));

    TestApp {
        router: create_router(app_state),
        store,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, token, Some(body)).await
    }

    /// Logs in one of the seeded demo accounts.
    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": "password123" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Registers a fresh account with no assessment and returns its token.
    pub async fn register(&self, email: &str, username: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                None,
                json!({ "email": email, "username": username, "password": "password123" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn interact(&self, token: &str, content_id: u64, format: &str, times: usize) {
        for _ in 0..times {
            let (status, _) = self
                .post(
                    &format!("/api/v1/content/{}/interaction", content_id),
                    Some(token),
                    json!({
                        "interaction_type": "view",
                        "format_used": format,
                        "duration_seconds": 120
                    }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
    }
}

pub fn answers(labels: &[&str]) -> Value {
    let answers: Vec<Value> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| json!({ "question_id": i + 1, "answer": label }))
        .collect();
    json!({ "answers": answers })
}
