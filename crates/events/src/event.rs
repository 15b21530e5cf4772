//! Events pushed server-to-client over the realtime channel.

use serde::{Deserialize, Serialize};

use chatline_core::session::RevocationReason;
use chatline_core::types::DbId;

/// An out-of-band event delivered to a WebSocket client.
///
/// Serialized as `{ "event": "<NAME>", "data": { ... } }` text frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerEvent {
    /// This connection's session has been invalidated; the client must
    /// discard its credential and return to the login screen.
    SessionRevoked {
        code: RevocationReason,
        message: String,
    },

    /// Roster update: ids of all users with a live connection. Broadcast to
    /// every connection on connect and disconnect.
    OnlineUsers { user_ids: Vec<DbId> },

    /// A direct message addressed to this connection's user.
    NewMessage { message: serde_json::Value },
}

impl ServerEvent {
    /// Build a revocation event carrying the reason's standard wording.
    pub fn revoked(code: RevocationReason) -> Self {
        ServerEvent::SessionRevoked {
            code,
            message: code.human_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_revoked_wire_shape() {
        let event = ServerEvent::revoked(RevocationReason::AnotherSession);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "SESSION_REVOKED");
        assert_eq!(json["data"]["code"], "ANOTHER_SESSION");
        assert_eq!(json["data"]["message"], "You were logged in from another device");
    }

    #[test]
    fn online_users_wire_shape() {
        let event = ServerEvent::OnlineUsers { user_ids: vec![3, 7] };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "ONLINE_USERS");
        assert_eq!(json["data"]["user_ids"], serde_json::json!([3, 7]));
    }
}
