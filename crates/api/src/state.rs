use std::sync::Arc;

use chatline_events::{ConnectionDirectory, RevocationNotifier};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: chatline_db::DbPool,
    /// Server configuration (JWT secret, CORS, cookie policy).
    pub config: Arc<ServerConfig>,
    /// Live connection directory (user id -> realtime connection).
    pub directory: Arc<dyn ConnectionDirectory>,
    /// Cross-device session revocation pusher.
    pub notifier: RevocationNotifier,
}
