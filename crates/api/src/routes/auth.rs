//! Route definitions for the `/auth` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup    -> signup (public)
/// POST /login     -> login (public)
/// POST /logout    -> logout (requires auth)
/// GET  /check     -> current user (requires auth)
/// PUT  /profile   -> update profile (requires auth)
/// PUT  /password  -> change password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check", get(auth::check))
        .route("/profile", put(auth::update_profile))
        .route("/password", put(auth::change_password))
}
