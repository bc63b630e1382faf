//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - Router construction against a live or deliberately unreachable database,
//!   or an in-memory store
//! - Request builders and response body helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::Service as _;
use userboard_api::app::{build_router, AppState};
use userboard_api::config::{Config, ServerConfig};
use userboard_shared::db::config::{DatabaseConfig, RetryPolicy};
use userboard_shared::db::provision::{acquire_connection, release};
use userboard_shared::db::store::{StoreError, UserStore};
use userboard_shared::models::user::{NewUser, User};

/// Boundary used by [`TestContext::post_multipart`]
pub const MULTIPART_BOUNDARY: &str = "userboard-test-boundary";

/// In-memory user store with MySQL-like auto-increment IDs
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    /// Number of stored users
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn add_user(&self, user: NewUser) -> Result<u64, StoreError> {
        let mut users = self.users.lock().unwrap();
        let id = users.len() as u64 + 1;
        users.push(User {
            id,
            name: user.name,
            email: user.email,
        });
        Ok(id)
    }
}

/// Test context containing the router and its configuration
pub struct TestContext {
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a context backed by the MySQL server from the DB_* variables
    ///
    /// Ensures the `users` table exists.
    pub async fn live() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let mut conn = acquire_connection(&config.database, &config.retry).await?;
        sqlx::query(include_str!("../../../schema.sql"))
            .execute(&mut conn)
            .await?;
        release(conn).await;

        Ok(Self::with_config(config))
    }

    /// Creates a context whose database can never be reached
    ///
    /// One attempt, no delay, so failures come back immediately.
    pub fn unreachable() -> Self {
        Self::with_config(Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                host: "127.0.0.1".to_string(),
                port: 1,
                ..Default::default()
            },
            retry: RetryPolicy::new(1, Duration::ZERO).expect("valid policy"),
        })
    }

    /// Creates a context backed by `store` instead of MySQL
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let config = Self::unreachable().config;
        let app = build_router(AppState::with_store(config.clone(), store));
        Self { app, config }
    }

    fn with_config(config: Config) -> Self {
        let app = build_router(AppState::new(config.clone()));
        Self { app, config }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.unwrap()
    }

    /// Sends a GET request
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Sends a form-encoded POST request
    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Sends a `multipart/form-data` POST request with plain text fields
    pub async fn post_multipart(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}

/// Reads a response body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Percent-encodes a value for a form body
pub fn form_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}
