//! Route tree assembly.

pub mod auth;
pub mod chats;
pub mod health;
pub mod messages;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                          WebSocket (handshake runs the liveness gate)
///
/// /auth/signup                 signup (public)
/// /auth/login                  login (public)
/// /auth/logout                 logout
/// /auth/check                  current user
/// /auth/profile                update display name / avatar
/// /auth/password               change password
///
/// /users/contacts              everyone except the caller
///
/// /messages/partners           distinct correspondents
/// /messages/with/{id}          conversation with a user
/// /messages/send/{id}          send a message
/// /messages/{id}               edit, delete
/// /messages/{id}/read          mark read
///
/// /chats                       list, create AI conversations
/// /chats/{id}                  get, update, delete
/// ```
///
/// Everything except signup and login requires a credential that passes the
/// liveness gate.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/messages", messages::router())
        .nest("/chats", chats::router())
}
