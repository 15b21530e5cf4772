//! Direct-message entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use chatline_core::types::{DbId, Timestamp};

/// A direct message row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub text: String,
    pub edited: bool,
    pub edited_at: Option<Timestamp>,
    pub read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new message.
pub struct CreateMessage {
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub text: String,
}
