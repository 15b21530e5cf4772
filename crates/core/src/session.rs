//! Single-active-session state machine and credential rejection taxonomy.
//!
//! Every user holds at most one valid session identifier at a time. Logging
//! in (or signing up) assigns a fresh identifier and instantly supersedes the
//! previous one -- there is no grace period. Logging out clears it. A bearer
//! credential is valid only while the identifier it embeds equals the user's
//! current one; expiry is a separate, time-based invalidation path checked
//! before the session comparison.
//!
//! The comparison itself lives here as [`check_session`] so the HTTP
//! middleware and the WebSocket handshake share one implementation instead of
//! drifting copies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a presented credential was rejected.
///
/// All four reasons instruct the client to
/// discard its stored credential (`should_logout` in the HTTP envelope);
/// only [`SessionSuperseded`](AuthRejection::SessionSuperseded) carries the
/// "logged in from another device" explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    /// No credential was presented at all.
    #[error("Unauthorized - no credential provided")]
    NoCredential,

    /// The credential is malformed, tampered with, or past its expiry.
    #[error("Unauthorized - invalid or expired credential")]
    InvalidCredential,

    /// The credential decodes cleanly but references a deleted user.
    #[error("User referenced by credential no longer exists")]
    UserNotFound,

    /// The credential's session id no longer matches the registry.
    #[error("Session expired - logged in from another device")]
    SessionSuperseded,
}

impl AuthRejection {
    /// Machine-readable reason code surfaced in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AuthRejection::NoCredential => "NO_CREDENTIAL",
            AuthRejection::InvalidCredential => "INVALID_CREDENTIAL",
            AuthRejection::UserNotFound => "USER_NOT_FOUND",
            AuthRejection::SessionSuperseded => "SESSION_SUPERSEDED",
        }
    }
}

/// Why a live connection was revoked out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevocationReason {
    /// A newer login superseded this connection's session.
    AnotherSession,
    /// The user logged out explicitly.
    LoggedOut,
}

impl RevocationReason {
    /// Human-readable explanation pushed alongside the reason code.
    pub fn human_message(&self) -> &'static str {
        match self {
            RevocationReason::AnotherSession => "You were logged in from another device",
            RevocationReason::LoggedOut => "You have been logged out",
        }
    }
}

/// A user's session identity, as read from the registry.
///
/// `NoSession` and `Active` are the only states; the machine cycles between
/// them (login: -> `Active(fresh id)`, logout: -> `NoSession`) and has no
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// `current_session_id` is NULL; no credential can validate.
    NoSession,
    /// Exactly one session id is valid.
    Active(String),
}

impl SessionState {
    /// Build from the registry column value.
    pub fn from_registry(current: Option<&str>) -> Self {
        match current {
            Some(id) => SessionState::Active(id.to_string()),
            None => SessionState::NoSession,
        }
    }

    /// Transition on a successful login/signup: mint and adopt a fresh id.
    ///
    /// Returns the new state and the id to embed in the issued credential.
    /// Any previously active id is discarded the instant this is persisted.
    pub fn login(&self) -> (Self, String) {
        let id = new_session_id();
        (SessionState::Active(id.clone()), id)
    }

    /// Transition on explicit logout.
    pub fn logout(&self) -> Self {
        SessionState::NoSession
    }
}

/// Generate a fresh, unpredictable session identifier.
///
/// UUID v4 -- 122 bits from the OS CSPRNG, never a counter.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// The Liveness Gate's session comparison.
///
/// `current` is the registry value (`users.current_session_id`), `presented`
/// the id embedded in an already signature- and expiry-checked credential.
/// A `NULL` registry value matches nothing, so a credential issued before a
/// logout fails here too.
pub fn check_session(current: Option<&str>, presented: &str) -> Result<(), AuthRejection> {
    match current {
        Some(id) if id == presented => Ok(()),
        _ => Err(AuthRejection::SessionSuperseded),
    }
}
