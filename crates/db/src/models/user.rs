//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use chatline_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash and the current session id -- NEVER serialize
/// this to API responses directly. Use [`UserResponse`] for external-facing
/// output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub profile_pic: String,
    /// The session registry: the single currently-valid session identifier,
    /// or `None` when the user is logged out everywhere.
    pub current_session_id: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Project to the safe external representation.
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

/// Safe user representation for API responses (no hash, no session id).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub profile_pic: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user.
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    /// Session id minted at signup so the first credential is valid.
    pub current_session_id: String,
}

/// DTO for profile edits. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub profile_pic: Option<String>,
}
