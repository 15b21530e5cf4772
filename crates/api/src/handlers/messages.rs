//! Handlers for the `/messages` resource (direct messages).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use chatline_core::error::CoreError;
use chatline_core::types::DbId;
use chatline_db::models::message::{CreateMessage, Message};
use chatline_db::models::user::UserResponse;
use chatline_db::repositories::{MessageRepo, UserRepo};
use chatline_events::ServerEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for sending or editing a message.
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub text: String,
}

/// GET /api/v1/messages/partners
///
/// Users the caller has exchanged messages with.
pub async fn partners(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let ids = MessageRepo::partner_ids(&state.pool, auth.user.id).await?;
    let users = UserRepo::find_by_ids(&state.pool, &ids).await?;
    Ok(Json(users.iter().map(|u| u.to_response()).collect()))
}

/// GET /api/v1/messages/with/{id}
///
/// Full conversation between the caller and another user, oldest first.
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(other_id): Path<DbId>,
) -> AppResult<Json<Vec<Message>>> {
    let messages = MessageRepo::conversation(&state.pool, auth.user.id, other_id).await?;
    Ok(Json(messages))
}

/// POST /api/v1/messages/send/{id}
///
/// Send a direct message. If the receiver has a live realtime connection,
/// the message is pushed to it as a `NEW_MESSAGE` event.
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(receiver_id): Path<DbId>,
    Json(input): Json<MessageBody>,
) -> AppResult<impl axum::response::IntoResponse> {
    let text = input.text.trim();
    if text.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content is required".into(),
        )));
    }
    if receiver_id == auth.user.id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot send messages to yourself".into(),
        )));
    }
    if !UserRepo::exists(&state.pool, receiver_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: receiver_id,
        }));
    }

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            sender_id: auth.user.id,
            receiver_id,
            text: text.to_string(),
        },
    )
    .await?;

    // Best-effort realtime delivery; an offline receiver reads it from the
    // conversation history instead.
    let payload = serde_json::to_value(&message)
        .map_err(|e| AppError::InternalError(format!("Message serialization error: {e}")))?;
    state
        .directory
        .send_to_user(receiver_id, ServerEvent::NewMessage { message: payload })
        .await;

    Ok((StatusCode::CREATED, Json(message)))
}

/// PUT /api/v1/messages/{id}
///
/// Edit one of the caller's own messages.
pub async fn edit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MessageBody>,
) -> AppResult<Json<Message>> {
    let text = input.text.trim();
    if text.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content is required".into(),
        )));
    }

    let message = MessageRepo::edit(&state.pool, id, auth.user.id, text)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "message",
            id,
        })?;
    Ok(Json(message))
}

/// PUT /api/v1/messages/{id}/read
///
/// Mark a message addressed to the caller as read. Idempotent.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Message>> {
    let message = MessageRepo::mark_read(&state.pool, id, auth.user.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "message",
            id,
        })?;
    Ok(Json(message))
}

/// DELETE /api/v1/messages/{id}
///
/// Delete one of the caller's own messages. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MessageRepo::delete(&state.pool, id, auth.user.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "message",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
