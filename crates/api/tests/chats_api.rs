//! Integration tests for the `/chats` resource (AI-conversation storage).

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, delete_auth, get_auth, post_json_auth, put_json_auth, signup_user,
    test_state,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_list_chats(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "alice@example.com", "Alice").await;

    let body = serde_json::json!({ "title": "Rust questions" });
    let response = post_json_auth(app.clone(), "/api/v1/chats", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let chat = body_json(response).await;
    assert_eq!(chat["title"], "Rust questions");
    // Default model when none is given.
    assert_eq!(chat["model"], "Mistral");
    assert!(chat["messages"].as_array().unwrap().is_empty());

    let response = get_auth(app, "/api/v1/chats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_title(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "alice@example.com", "Alice").await;

    let body = serde_json::json!({ "title": "   " });
    let response = post_json_auth(app, "/api/v1/chats", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_transcript(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "alice@example.com", "Alice").await;

    let body = serde_json::json!({ "title": "Scratch", "model": "Llama" });
    let response = post_json_auth(app.clone(), "/api/v1/chats", body, &token).await;
    let chat_id = body_json(response).await["id"].as_i64().unwrap();

    let now = chrono::Utc::now().to_rfc3339();
    let body = serde_json::json!({
        "title": "Borrow checker",
        "messages": [
            { "role": "user", "content": "why does this not compile?", "timestamp": now },
            { "role": "assistant", "content": "the borrow outlives the value", "timestamp": now },
        ],
    });
    let response = put_json_auth(app.clone(), &format!("/api/v1/chats/{chat_id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Borrow checker");
    // Untouched field keeps its value.
    assert_eq!(json["model"], "Llama");
    assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    assert_eq!(json["messages"][1]["role"], "assistant");

    let response = get_auth(app, &format!("/api/v1/chats/{chat_id}"), &token).await;
    assert_eq!(
        body_json(response).await["messages"].as_array().unwrap().len(),
        2
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn chats_are_scoped_to_their_owner(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, alice) = signup_user(app.clone(), "alice@example.com", "Alice").await;
    let (_, bob) = signup_user(app.clone(), "bob@example.com", "Bob").await;

    let body = serde_json::json!({ "title": "Private notes" });
    let response = post_json_auth(app.clone(), "/api/v1/chats", body, &alice).await;
    let chat_id = body_json(response).await["id"].as_i64().unwrap();

    // Another user sees neither the chat nor its existence.
    let response = get_auth(app.clone(), &format!("/api/v1/chats/{chat_id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/v1/chats/{chat_id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/v1/chats", &bob).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_chat(pool: PgPool) {
    let state = test_state(pool);
    let app = build_test_app(state);

    let (_, token) = signup_user(app.clone(), "alice@example.com", "Alice").await;

    let body = serde_json::json!({ "title": "Ephemeral" });
    let response = post_json_auth(app.clone(), "/api/v1/chats", body, &token).await;
    let chat_id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/chats/{chat_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/chats/{chat_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
