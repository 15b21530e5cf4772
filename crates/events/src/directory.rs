//! Live Connection Directory: `user id -> realtime connection handle`.
//!
//! Entries are created after the connection's handshake passes the liveness
//! gate and removed on disconnect. At most one entry per user is retained:
//! registering while an entry exists replaces it (last-write-wins), so the
//! revocation notifier reaches whichever connection registered last.
//!
//! The directory is a trait so the in-memory single-process implementation
//! can be swapped for a shared backing store in a multi-instance deployment
//! without touching call sites.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use chatline_core::types::DbId;

use crate::event::ServerEvent;

/// Channel sender half for pushing events to a connection.
///
/// Dropping the sender closes the channel; the socket task treats that as an
/// instruction to close the transport.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Opaque per-registration token.
///
/// A disconnecting socket passes its token back so it can only evict its own
/// entry -- a tab replaced by a newer login must not tear down its successor.
pub type ConnectionToken = Uuid;

/// Abstract directory of live realtime connections.
#[async_trait]
pub trait ConnectionDirectory: Send + Sync {
    /// Register `sender` as the user's live connection, superseding any
    /// existing entry. Returns the token identifying this registration.
    async fn register(&self, user_id: DbId, sender: EventSender) -> ConnectionToken;

    /// Remove the user's entry, but only if it still belongs to `token`.
    async fn unregister(&self, user_id: DbId, token: ConnectionToken);

    /// Remove and return the user's entry regardless of token.
    ///
    /// Used by the revocation notifier: dropping the returned sender closes
    /// the connection's outbound channel server-side.
    async fn take(&self, user_id: DbId) -> Option<EventSender>;

    /// Push an event to the user's live connection, if any.
    ///
    /// Returns `true` when a connection was found and the event queued.
    async fn send_to_user(&self, user_id: DbId, event: ServerEvent) -> bool;

    /// Push an event to every live connection.
    async fn broadcast(&self, event: ServerEvent);

    /// Ids of all users with a live connection.
    async fn online_user_ids(&self) -> Vec<DbId>;

    /// Number of live connections.
    async fn connection_count(&self) -> usize;

    /// Drop every entry, closing all outbound channels.
    ///
    /// Used during graceful shutdown; returns the number of entries dropped.
    async fn clear(&self) -> usize;
}

/// One registered connection.
struct Registration {
    token: ConnectionToken,
    sender: EventSender,
}

/// Process-local directory backed by a `RwLock<HashMap>`.
///
/// Not persisted: after a restart it is rebuilt as clients reconnect and
/// re-pass the handshake gate.
#[derive(Default)]
pub struct InMemoryDirectory {
    connections: RwLock<HashMap<DbId, Registration>>,
}

impl InMemoryDirectory {
    /// Create a new, empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionDirectory for InMemoryDirectory {
    async fn register(&self, user_id: DbId, sender: EventSender) -> ConnectionToken {
        let token = Uuid::new_v4();
        let previous = self
            .connections
            .write()
            .await
            .insert(user_id, Registration { token, sender });
        if previous.is_some() {
            // Last-write-wins: the older tab's sender drops here, which
            // closes its channel and lets its socket task exit.
            tracing::debug!(user_id, "Replaced existing live connection");
        }
        token
    }

    async fn unregister(&self, user_id: DbId, token: ConnectionToken) {
        let mut conns = self.connections.write().await;
        if conns.get(&user_id).is_some_and(|reg| reg.token == token) {
            conns.remove(&user_id);
        }
    }

    async fn take(&self, user_id: DbId) -> Option<EventSender> {
        self.connections
            .write()
            .await
            .remove(&user_id)
            .map(|reg| reg.sender)
    }

    async fn send_to_user(&self, user_id: DbId, event: ServerEvent) -> bool {
        let conns = self.connections.read().await;
        match conns.get(&user_id) {
            Some(reg) => reg.sender.send(event).is_ok(),
            None => false,
        }
    }

    async fn broadcast(&self, event: ServerEvent) {
        let conns = self.connections.read().await;
        for reg in conns.values() {
            // Closed channels are skipped; their socket tasks clean up on
            // their next loop iteration.
            let _ = reg.sender.send(event.clone());
        }
    }

    async fn online_user_ids(&self) -> Vec<DbId> {
        self.connections.read().await.keys().copied().collect()
    }

    async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    async fn clear(&self) -> usize {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        conns.clear();
        count
    }
}
