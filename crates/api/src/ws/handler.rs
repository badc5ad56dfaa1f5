use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::hub::TodoHub;
use crate::ws::protocol::ClientMessage;

/// HTTP handler that upgrades the connection to WebSocket at `/todohub`.
///
/// After the upgrade the connection is registered with [`TodoHub`] and
/// managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with the hub.
///   2. Spawns a sender task that forwards messages from the hub channel.
///   3. Processes inbound group commands on the current task.
///   4. Cleans up on disconnect, removing the connection from all groups.
async fn handle_socket(socket: WebSocket, hub: Arc<TodoHub>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = hub.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound group commands.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::JoinListGroup { list_id }) => {
                    tracing::debug!(conn_id = %conn_id, list_id = %list_id, "Joining list group");
                    hub.join_group(&list_id, &conn_id).await;
                }
                Ok(ClientMessage::LeaveListGroup { list_id }) => {
                    tracing::debug!(conn_id = %conn_id, list_id = %list_id, "Leaving list group");
                    hub.leave_group(&list_id, &conn_id).await;
                }
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed message");
                }
            },
            Ok(_msg) => {
                // Binary and ping frames carry no hub commands.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection (and its group memberships) and stop the
    // sender task.
    hub.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
