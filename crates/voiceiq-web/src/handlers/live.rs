//! Live call feed over WebSocket
//!
//! Each connection gets its own refresh task: the freshest call list is
//! pushed every 5 seconds while the socket is open, and the task ends the
//! moment the peer disconnects. This is the page-visit-scoped poller: the
//! dashboard opens the socket on mount and navigation away cancels it.

use crate::{middleware::AuthSession, state::AppState};
use axum::{
    Extension,
    extract::{State, WebSocketUpgrade},
    extract::ws::{Message, WebSocket},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::{info, warn};

/// Refresh cadence for pushed call lists
const UPDATE_INTERVAL: Duration = Duration::from_secs(5);

/// Keepalive ping cadence
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Upgrade handler for the live call feed
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthSession>,
) -> Response {
    ws.on_upgrade(move |socket| call_feed(socket, state, auth.session.token))
}

/// Per-connection refresh loop
async fn call_feed(socket: WebSocket, state: Arc<AppState>, token: String) {
    let (mut sender, mut receiver) = socket.split();
    let client = state.api_client.with_token(token);

    info!("call feed connection established");

    let mut update_interval = interval(UPDATE_INTERVAL);
    let mut ping_interval = interval(PING_INTERVAL);

    loop {
        tokio::select! {
            _ = update_interval.tick() => {
                match client.list_calls().await {
                    Ok(calls) => {
                        let update = serde_json::json!({
                            "type": "calls_update",
                            "data": calls,
                        });

                        if sender.send(Message::Text(update.to_string())).await.is_err() {
                            break;
                        }
                    }
                    // A failed refresh is not fatal; the next tick retries
                    // the same way an interval fetch would
                    Err(e) => warn!("call feed refresh failed: {e}"),
                }
            }
            _ = ping_interval.tick() => {
                if sender.send(Message::Ping(vec![])).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("call feed socket error: {e}");
                        break;
                    }
                }
            }
        }
    }

    info!("call feed connection closed");
}
