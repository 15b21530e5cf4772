//! Revocation Notifier: cross-device "your session is gone" push.

use std::sync::Arc;

use chatline_core::session::RevocationReason;
use chatline_core::types::DbId;

use crate::directory::ConnectionDirectory;
use crate::event::ServerEvent;

/// Pushes an out-of-band revocation event to a user's live connection when a
/// new session supersedes theirs.
///
/// The push is a best-effort optimization over the liveness gate's lazy
/// detection; a user with no live connection is the common case and a no-op.
#[derive(Clone)]
pub struct RevocationNotifier {
    directory: Arc<dyn ConnectionDirectory>,
}

impl RevocationNotifier {
    pub fn new(directory: Arc<dyn ConnectionDirectory>) -> Self {
        Self { directory }
    }

    /// Notify the user's live connection (if any) that its session has been
    /// revoked, then drop the registration so the transport closes
    /// server-side instead of waiting for the client to comply.
    ///
    /// Returns `true` when a live connection was found. Idempotent: with no
    /// live connection this does nothing and is not an error.
    pub async fn notify(&self, user_id: DbId, reason: RevocationReason) -> bool {
        match self.directory.take(user_id).await {
            Some(sender) => {
                tracing::info!(user_id, ?reason, "Revoking live connection");
                // The channel may already be closed if the socket is mid-
                // teardown; that is fine, lazy detection still applies.
                let _ = sender.send(ServerEvent::revoked(reason));
                // Dropping `sender` closes the outbound channel, which the
                // socket task converts into a transport-level close.
                true
            }
            None => false,
        }
    }
}
