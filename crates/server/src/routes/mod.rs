//! HTTP routes for the site backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (pings the store)
//!
//! # Auth
//! POST /api/auth/register         - Register the admin (configured email only)
//! POST /api/auth/login            - Log in, returns a bearer token
//! GET  /api/auth/verify           - Check a bearer token (admin)
//!
//! # Content
//! GET  /api/content               - List section keys and titles
//! GET  /api/content/{section_key} - One section document
//! PUT  /api/content/{section_key} - Create or replace a section (admin)
//! POST /api/content/init          - Seed default sections (admin)
//!
//! # Contact
//! POST /api/contact               - Submit the contact form
//! GET  /api/contact               - List submissions, newest first (admin)
//! ```

pub mod auth;
pub mod contact;
pub mod content;
pub mod health;

use axum::{
    Router,
    http::{Method, header},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/content", get(content::list))
        .route("/content/init", post(content::init))
        .route(
            "/content/{section_key}",
            get(content::show).put(content::update),
        )
        .route("/contact", get(contact::list).post(contact::submit))
}

/// Build the complete application with its middleware stack.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        admin_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origin = state
        .config()
        .cors_origin
        .clone()
        .map_or_else(|| AllowOrigin::from(Any), AllowOrigin::exact);

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn not_found() -> AppError {
    AppError::NotFound("Route".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use megaprime_core::Email;
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;
    use crate::db::MemoryStore;

    const ADMIN: &str = "admin@megaprime.example";
    const PASSWORD: &str = "s3cure-pass";

    fn app() -> Router {
        let config = ServerConfig::new(
            Email::parse(ADMIN).unwrap(),
            SecretString::from("k9$Qm2!vX7@pL4#zR8&nT1*wY6^bC3%d"),
        );
        router(AppState::new(config, Arc::new(MemoryStore::new())))
    }

    async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn admin_token(app: &Router) -> String {
        let response = send(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"email": ADMIN, "password": PASSWORD})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        assert_eq!(send(&app, "GET", "/health", None, None).await.status(), StatusCode::OK);
        assert_eq!(
            send(&app, "GET", "/health/ready", None, None).await.status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = app();
        let response = send(&app, "GET", "/api/nope", None, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = app();
        for (method, uri, body) in [
            ("GET", "/api/auth/verify", None),
            ("PUT", "/api/content/hero", Some(json!({"title": "t", "content": {}}))),
            ("POST", "/api/content/init", None),
            ("GET", "/api/contact", None),
        ] {
            let response = send(&app, method, uri, None, body.clone()).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");

            let response = send(&app, method, uri, Some("not.a.token"), body).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_verify_returns_admin_id() {
        let app = app();
        let token = admin_token(&app).await;

        let response = send(&app, "GET", "/api/auth/verify", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Token is valid");
        assert_eq!(body["adminId"], 1);
    }

    #[tokio::test]
    async fn test_update_then_read_content() {
        let app = app();
        let token = admin_token(&app).await;
        let content = json!({"title": "Overview", "description": "Two and three BHK homes"});

        let response = send(
            &app,
            "PUT",
            "/api/content/project-overview",
            Some(&token),
            Some(json!({"title": "Project Overview", "content": content})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", "/api/content/project-overview", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sectionId"], "project-overview");
        assert_eq!(body["title"], "Project Overview");
        assert_eq!(body["content"], content);
        assert!(body["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_is_404() {
        let app = app();
        let response = send(&app, "GET", "/api/content/hero", None, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["message"], "Content not found");
    }

    #[tokio::test]
    async fn test_init_accepts_missing_only_mode() {
        let app = app();
        let token = admin_token(&app).await;

        let response = send(&app, "POST", "/api/content/init", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["written"].as_array().unwrap().len(), 7);

        let response = send(
            &app,
            "POST",
            "/api/content/init?mode=missing-only",
            Some(&token),
            None,
        )
        .await;
        let body = json_body(response).await;
        assert!(body["written"].as_array().unwrap().is_empty());
        assert_eq!(body["skipped"].as_array().unwrap().len(), 7);

        let response = send(&app, "POST", "/api/content/init?mode=bogus", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_contact_submit_and_list() {
        let app = app();
        let response = send(
            &app,
            "POST",
            "/api/contact",
            None,
            Some(json!({"name": "Priya", "email": "buyer@example.com", "message": "Site visit?"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Contact form submitted successfully");
        assert_eq!(body["contact"]["name"], "Priya");

        let token = admin_token(&app).await;
        let response = send(&app, "GET", "/api/contact", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_missing_field_is_400() {
        let app = app();
        let response = send(
            &app,
            "POST",
            "/api/contact",
            None,
            Some(json!({"name": "Priya", "email": "buyer@example.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Please fill in all required fields"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_error() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["message"].is_string());
    }
}
