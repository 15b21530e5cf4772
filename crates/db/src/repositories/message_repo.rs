//! Repository for the `messages` table.

use sqlx::PgPool;

use chatline_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sender_id, receiver_id, text, edited, edited_at, \
                        read, read_at, created_at, updated_at";

/// Provides CRUD operations for direct messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, receiver_id, text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.sender_id)
            .bind(input.receiver_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// Find a message by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All messages exchanged between two users, oldest first.
    pub async fn conversation(
        pool: &PgPool,
        a: DbId,
        b: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(a)
            .bind(b)
            .fetch_all(pool)
            .await
    }

    /// Distinct ids of users the given user has exchanged messages with.
    pub async fn partner_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT CASE WHEN sender_id = $1 THEN receiver_id ELSE sender_id END
             FROM messages
             WHERE sender_id = $1 OR receiver_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace a message's text and flag it as edited.
    ///
    /// Scoped to the sender; returns `None` when the message does not exist
    /// or is not owned by `sender_id`.
    pub async fn edit(
        pool: &PgPool,
        id: DbId,
        sender_id: DbId,
        text: &str,
    ) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET text = $3, edited = TRUE, edited_at = NOW()
             WHERE id = $1 AND sender_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(sender_id)
            .bind(text)
            .fetch_optional(pool)
            .await
    }

    /// Mark a message read. Scoped to the receiver; idempotent.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        receiver_id: DbId,
    ) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET read = TRUE, read_at = COALESCE(read_at, NOW())
             WHERE id = $1 AND receiver_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(receiver_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a message. Scoped to the sender; returns `true` when a row went.
    pub async fn delete(pool: &PgPool, id: DbId, sender_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND sender_id = $2")
            .bind(id)
            .bind(sender_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
