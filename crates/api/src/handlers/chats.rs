//! Handlers for the `/chats` resource (AI-assistant conversations).
//!
//! Persistence only: forwarding transcripts to an AI provider is out of
//! scope for this service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use chatline_core::error::CoreError;
use chatline_core::types::DbId;
use chatline_db::models::chat::{Chat, CreateChat, UpdateChat};
use chatline_db::repositories::ChatRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/chats
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Chat>>> {
    let chats = ChatRepo::list_for_user(&state.pool, auth.user.id).await?;
    Ok(Json(chats))
}

/// POST /api/v1/chats
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateChat>,
) -> AppResult<impl axum::response::IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title is required".into(),
        )));
    }
    let chat = ChatRepo::create(&state.pool, auth.user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

/// GET /api/v1/chats/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Chat>> {
    let chat = ChatRepo::find_for_user(&state.pool, id, auth.user.id)
        .await?
        .ok_or(CoreError::NotFound { entity: "chat", id })?;
    Ok(Json(chat))
}

/// PUT /api/v1/chats/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChat>,
) -> AppResult<Json<Chat>> {
    let chat = ChatRepo::update(&state.pool, id, auth.user.id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "chat", id })?;
    Ok(Json(chat))
}

/// DELETE /api/v1/chats/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ChatRepo::delete(&state.pool, id, auth.user.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "chat", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
