use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use todo_core::completion::CompletionProgress;
use todo_core::types::Timestamp;
use tokio::sync::{mpsc, RwLock};

use crate::ws::protocol;

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct HubConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections and their per-list groups.
///
/// Group membership maps a list id (as string) to the set of connection
/// ids subscribed to that list. Membership mutation and broadcast may run
/// concurrently; a broadcast works from a snapshot of the membership taken
/// under the read lock, so joins and leaves mid-broadcast are safe.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct TodoHub {
    connections: RwLock<HashMap<String, HubConnection>>,
    groups: RwLock<HashMap<String, HashSet<String>>>,
}

impl TodoHub {
    /// Create a new, empty hub.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = HubConnection {
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID and erase it from every group.
    ///
    /// Called when a connection dies; afterwards no broadcast will attempt
    /// delivery to this connection.
    pub async fn remove(&self, conn_id: &str) {
        if let Some(conn) = self.connections.write().await.remove(conn_id) {
            let session_secs = (chrono::Utc::now() - conn.connected_at).num_seconds();
            tracing::debug!(conn_id, session_secs, "Connection removed");
        }

        let mut groups = self.groups.write().await;
        groups.retain(|_, members| {
            members.remove(conn_id);
            !members.is_empty()
        });
    }

    /// Add a connection to the subscriber group for a list. Idempotent.
    ///
    /// Unknown connection ids are ignored so a racing disconnect cannot
    /// leave a ghost membership behind.
    pub async fn join_group(&self, list_id: &str, conn_id: &str) {
        if !self.connections.read().await.contains_key(conn_id) {
            tracing::debug!(list_id, conn_id, "Ignoring join from unknown connection");
            return;
        }
        self.groups
            .write()
            .await
            .entry(list_id.to_string())
            .or_default()
            .insert(conn_id.to_string());
    }

    /// Remove a connection from a group. Silently a no-op if absent.
    pub async fn leave_group(&self, list_id: &str, conn_id: &str) {
        let mut groups = self.groups.write().await;
        if let Some(members) = groups.get_mut(list_id) {
            members.remove(conn_id);
            if members.is_empty() {
                groups.remove(list_id);
            }
        }
    }

    /// Broadcast a completion progress event to the group of its list.
    ///
    /// Delivery is best-effort: connections whose send channels are closed
    /// are silently skipped (they will be cleaned up when their receive
    /// loop exits).
    pub async fn broadcast_completion(&self, progress: &CompletionProgress) {
        let message = protocol::completion_update_message(progress);
        self.broadcast_to_group(&progress.list_id.to_string(), message)
            .await;
    }

    /// Push a message to every current member of a group.
    pub async fn broadcast_to_group(&self, list_id: &str, message: Message) {
        let members: Vec<String> = {
            let groups = self.groups.read().await;
            match groups.get(list_id) {
                Some(members) => members.iter().cloned().collect(),
                None => return,
            }
        };

        let conns = self.connections.read().await;
        for conn_id in &members {
            if let Some(conn) = conns.get(conn_id) {
                let _ = conn.sender.send(message.clone());
            }
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Return the current number of members in a list's group.
    pub async fn group_size(&self, list_id: &str) -> usize {
        self.groups
            .read()
            .await
            .get(list_id)
            .map_or(0, HashSet::len)
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear all state.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        self.groups.write().await.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for TodoHub {
    fn default() -> Self {
        Self::new()
    }
}
