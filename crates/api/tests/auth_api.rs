//! Integration tests for the `/auth` resource: signup, login, profile and
//! password management. Session supersession itself is covered in
//! `session_api.rs`.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get_auth, login_user, post_json, put_json_auth, signup_user,
    test_state,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_creates_account_and_returns_credential(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let body = serde_json::json!({
        "email": "alice@example.com",
        "full_name": "Alice",
        "password": "test-password-123",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(!json["token"].as_str().unwrap().is_empty());
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["full_name"], "Alice");
    // Secrets never leave the server.
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("current_session_id").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_rejects_duplicate_email(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    signup_user(app.clone(), "bob@example.com", "Bob").await;

    let body = serde_json::json!({
        "email": "bob@example.com",
        "full_name": "Bob Again",
        "password": "test-password-123",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_rejects_invalid_email(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let body = serde_json::json!({
        "email": "not-an-email",
        "full_name": "Nobody",
        "password": "test-password-123",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_rejects_short_password(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let body = serde_json::json!({
        "email": "carol@example.com",
        "full_name": "Carol",
        "password": "abc",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_fresh_credential(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, signup_token) = signup_user(app.clone(), "dave@example.com", "Dave").await;
    let login_token = login_user(app.clone(), "dave@example.com").await;

    // A login mints a new session, so the credential changes.
    assert_ne!(signup_token, login_token);

    let response = get_auth(app, "/api/v1/auth/check", &login_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "dave@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    signup_user(app.clone(), "eve@example.com", "Eve").await;

    let body = serde_json::json!({ "email": "eve@example.com", "password": "wrong-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A failed login is not a gate rejection: no logout instruction.
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json.get("should_logout").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_unknown_email(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": "whatever-123" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_profile_changes_display_name(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "fred@example.com", "Fred").await;

    let body = serde_json::json!({ "full_name": "Frederick" });
    let response = put_json_auth(app.clone(), "/api/v1/auth/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["full_name"], "Frederick");

    // The change persists.
    let response = get_auth(app, "/api/v1/auth/check", &token).await;
    assert_eq!(body_json(response).await["full_name"], "Frederick");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_profile_rejects_empty_payload(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "gina@example.com", "Gina").await;

    let response = put_json_auth(app, "/api/v1/auth/profile", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_requires_current_password(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "hank@example.com", "Hank").await;

    let body = serde_json::json!({
        "current_password": "wrong-password",
        "new_password": "brand-new-password",
    });
    let response = put_json_auth(app, "/api/v1/auth/password", body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_rotates_credentials(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "iris@example.com", "Iris").await;

    let body = serde_json::json!({
        "current_password": "test-password-123",
        "new_password": "brand-new-password",
    });
    let response = put_json_auth(app.clone(), "/api/v1/auth/password", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old password no longer logs in; the new one does.
    let body = serde_json::json!({ "email": "iris@example.com", "password": "test-password-123" });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = serde_json::json!({ "email": "iris@example.com", "password": "brand-new-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}
