//! Authenticated-user extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chatline_db::models::user::User;

use crate::auth::gate::{token_from_headers, verify_credential};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved by the liveness gate.
///
/// Use this as an extractor parameter in any handler that requires identity:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The extractor pulls the credential from the `Authorization: Bearer` header
/// or the `jwt` cookie and delegates to [`verify_credential`] -- the same
/// function the WebSocket handshake uses, so the two transports cannot
/// enforce different rules.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved user row (session id verified as current).
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers);
        let user = verify_credential(&state.pool, &state.config.jwt, token.as_deref()).await?;
        Ok(AuthUser { user })
    }
}
