//! Integration tests for the MegaPrime site backend.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests against the in-memory store
//! cargo test -p megaprime-integration-tests
//!
//! # Live-server smoke test (start the server with MEGAPRIME_STORE=memory first)
//! MEGAPRIME_BASE_URL=http://localhost:5000 \
//!     cargo test -p megaprime-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth` - Registration, login and token checks
//! - `content` - Section reads, upserts and seeding
//! - `contact` - Contact form intake and listing
//! - `live_server` - Smoke test over real HTTP

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use megaprime_core::Email;
use megaprime_server::db::MemoryStore;
use megaprime_server::{AppState, ServerConfig, router};

/// The configured admin address for every test app.
pub const ADMIN_EMAIL: &str = "admin@megaprime.example";
/// Password used by [`TestApp::register_admin`].
pub const ADMIN_PASSWORD: &str = "s3cure-admin-pass";
/// Signing secret for test tokens.
pub const JWT_SECRET: &str = "k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d";

/// A response with its body parsed as JSON (`Value::Null` when empty or not JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// The full router over a fresh in-memory store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build an app with default configuration and an empty store.
    #[must_use]
    pub fn new() -> Self {
        let config = ServerConfig::new(
            Email::parse(ADMIN_EMAIL).unwrap(),
            SecretString::from(JWT_SECRET),
        );
        Self {
            router: router(AppState::new(config, Arc::new(MemoryStore::new()))),
        }
    }

    /// Send a request, optionally with a bearer token and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
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
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET` without a token.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    /// `POST` a JSON body without a token.
    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    /// `PUT` a section as the admin.
    pub async fn put_content(&self, token: &str, key: &str, title: &str, content: &Value) -> TestResponse {
        self.request(
            Method::PUT,
            &format!("/api/content/{key}"),
            Some(token),
            Some(&json!({ "title": title, "content": content })),
        )
        .await
    }

    /// Register the admin account and return its token.
    pub async fn register_admin(&self) -> String {
        let response = self
            .post(
                "/api/auth/register",
                &json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }
}
