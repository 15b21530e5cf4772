//! Repository for the `chats` table (AI conversations).
//!
//! Every accessor is ownership-scoped: a conversation is only visible to the
//! user that created it.

use sqlx::types::Json;
use sqlx::PgPool;

use chatline_core::types::DbId;

use crate::models::chat::{Chat, CreateChat, UpdateChat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, model, messages, created_at, updated_at";

/// Default model label when the client does not pick one.
const DEFAULT_MODEL: &str = "Mistral";

/// Provides CRUD operations for AI conversations.
pub struct ChatRepo;

impl ChatRepo {
    /// Insert a new conversation for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateChat,
    ) -> Result<Chat, sqlx::Error> {
        let query = format!(
            "INSERT INTO chats (user_id, title, model, messages)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.model.as_deref().unwrap_or(DEFAULT_MODEL))
            .bind(Json(&input.messages))
            .fetch_one(pool)
            .await
    }

    /// List the user's conversations, most recently updated first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Chat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chats WHERE user_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's conversations by id.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply an update. Only non-`None` fields are applied; `messages`
    /// replaces the entire transcript.
    ///
    /// Returns `None` when the conversation does not exist or belongs to
    /// someone else.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateChat,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!(
            "UPDATE chats SET
                title = COALESCE($3, title),
                model = COALESCE($4, model),
                messages = COALESCE($5, messages)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.model)
            .bind(input.messages.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a conversation. Returns `true` when a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
