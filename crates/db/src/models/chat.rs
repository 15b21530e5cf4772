//! AI-conversation entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use chatline_core::types::{DbId, Timestamp};

/// One turn of an AI conversation, stored inside the JSONB transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    /// `"user"` or `"assistant"`.
    pub role: String,
    pub content: String,
    pub timestamp: Timestamp,
}

/// An AI conversation row from the `chats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    /// Display label of the model the conversation targets (e.g. `"Mistral"`).
    pub model: String,
    pub messages: Json<Vec<ChatEntry>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a conversation.
#[derive(Debug, Deserialize)]
pub struct CreateChat {
    pub title: String,
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatEntry>,
}

/// DTO for updating a conversation. Only non-`None` fields are applied;
/// `messages` replaces the whole transcript when present.
#[derive(Debug, Deserialize)]
pub struct UpdateChat {
    pub title: Option<String>,
    pub model: Option<String>,
    pub messages: Option<Vec<ChatEntry>>,
}
