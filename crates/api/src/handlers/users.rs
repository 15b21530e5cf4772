//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;

use chatline_db::models::user::UserResponse;
use chatline_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users/contacts
///
/// Everyone except the caller, for starting new conversations.
pub async fn contacts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_except(&state.pool, auth.user.id).await?;
    Ok(Json(users.iter().map(|u| u.to_response()).collect()))
}
