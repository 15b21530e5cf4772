//! Route definitions for the `/messages` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`. All require auth.
///
/// ```text
/// GET    /partners     -> distinct correspondents
/// GET    /with/{id}    -> conversation with user {id}
/// POST   /send/{id}    -> send message to user {id}
/// PUT    /{id}         -> edit own message
/// PUT    /{id}/read    -> mark received message read
/// DELETE /{id}         -> delete own message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/partners", get(messages::partners))
        .route("/with/{id}", get(messages::conversation))
        .route("/send/{id}", post(messages::send))
        .route("/{id}", put(messages::edit).delete(messages::delete))
        .route("/{id}/read", put(messages::mark_read))
}
