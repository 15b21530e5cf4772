use std::collections::HashMap;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use chatline_core::types::DbId;
use chatline_events::ServerEvent;

use crate::auth::gate::{token_from_headers, verify_credential};
use crate::error::AppError;
use crate::state::AppState;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// The handshake is subject to the same liveness gate as REST requests: the
/// credential comes from the `Authorization` header, the `jwt` cookie, or a
/// `?token=` query parameter for clients that cannot set either. A rejected
/// handshake gets the standard 401 envelope instead of an upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = token_from_headers(&headers).or_else(|| params.get("token").cloned());
    let user = verify_credential(&state.pool, &state.config.jwt, token.as_deref()).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user.id)))
}

/// Manage a single authenticated WebSocket connection after upgrade.
///
/// 1. Registers the connection in the directory (superseding any older tab).
/// 2. Broadcasts the updated online roster to everyone.
/// 3. Spawns a sender task forwarding directory events to the sink, with a
///    periodic heartbeat ping.
/// 4. Processes inbound frames on the current task.
/// 5. Cleans up and re-broadcasts the roster on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: DbId) {
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let token = state.directory.register(user_id, tx).await;
    tracing::info!(user_id, "WebSocket connected");

    broadcast_roster(&state).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward directory events to the WebSocket sink.
    let send_task = tokio::spawn(async move {
        let mut heartbeat =
            tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
        heartbeat.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => {
                        let json = match serde_json::to_string(&event) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::error!(error = %e, "Event serialization failed");
                                continue;
                            }
                        };
                        if sink.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    // Channel closed: the registration was dropped, either by
                    // the revocation notifier or a replacing login. Close the
                    // transport server-side rather than trusting the client.
                    None => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                },
                _ = heartbeat.tick() => {
                    if sink.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Receiver loop: process inbound frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(user_id, "Pong received");
            }
            Ok(_msg) => {
                // Clients receive pushes but do not send application frames.
            }
            Err(e) => {
                tracing::debug!(user_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Token-guarded removal: a tab that was replaced by a newer login (or
    // already evicted by the notifier) cannot tear down its successor.
    state.directory.unregister(user_id, token).await;
    broadcast_roster(&state).await;
    send_task.abort();
    tracing::info!(user_id, "WebSocket disconnected");
}

/// Push the current online-user roster to every live connection.
async fn broadcast_roster(state: &AppState) {
    let user_ids = state.directory.online_user_ids().await;
    state
        .directory
        .broadcast(ServerEvent::OnlineUsers { user_ids })
        .await;
}
