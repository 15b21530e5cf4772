//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` (via the
//! shared `build_app_router`) so tests exercise the same middleware stack
//! production uses. The state is built separately so tests can reach the
//! connection directory to register fake realtime connections.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use chatline_api::auth::jwt::JwtConfig;
use chatline_api::config::ServerConfig;
use chatline_api::router::build_app_router;
use chatline_api::state::AppState;
use chatline_events::{ConnectionDirectory, InMemoryDirectory, RevocationNotifier};

/// Known secret so tests can mint their own tokens (e.g. expired ones).
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            token_expiry_days: 7,
        },
    }
}

/// Build the shared application state over the given pool.
pub fn test_state(pool: PgPool) -> AppState {
    let directory: Arc<dyn ConnectionDirectory> = Arc::new(InMemoryDirectory::new());
    AppState {
        pool,
        config: Arc::new(test_config()),
        directory: Arc::clone(&directory),
        notifier: RevocationNotifier::new(directory),
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(state: AppState) -> Router {
    let config = state.config.clone();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send_request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    send_request(app, Method::GET, path, None, None).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send_request(app, Method::GET, path, Some(token), None).await
}

/// GET with a raw `Cookie` header instead of a bearer token.
pub async fn get_with_cookie(app: Router, path: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send_request(app, Method::POST, path, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_request(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send_request(app, Method::POST, path, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_request(app, Method::PUT, path, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send_request(app, Method::DELETE, path, Some(token), None).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up a user through the API, returning `(user_id, token)`.
pub async fn signup_user(app: Router, email: &str, full_name: &str) -> (i64, String) {
    let body = serde_json::json!({
        "email": email,
        "full_name": full_name,
        "password": "test-password-123",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().expect("user id");
    let token = json["token"].as_str().expect("token").to_string();
    (user_id, token)
}

/// Log a user in through the API, returning the fresh token.
pub async fn login_user(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": "test-password-123" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token").to_string()
}
