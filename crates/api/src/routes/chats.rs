//! Route definitions for the `/chats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::chats;
use crate::state::AppState;

/// Routes mounted at `/chats`. All require auth and are ownership-scoped.
///
/// ```text
/// GET    /         -> list conversations
/// POST   /         -> create conversation
/// GET    /{id}     -> fetch conversation
/// PUT    /{id}     -> update title/model/transcript
/// DELETE /{id}     -> delete conversation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chats::list).post(chats::create))
        .route(
            "/{id}",
            get(chats::get).put(chats::update).delete(chats::delete),
        )
}
