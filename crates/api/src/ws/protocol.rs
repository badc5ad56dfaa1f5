//! Wire protocol for the `/todohub` WebSocket endpoint.
//!
//! All frames are JSON text. Clients send group membership commands;
//! the server pushes completion updates as a method name plus an ordered
//! argument list.

use axum::extract::ws::Message;
use serde::Deserialize;
use todo_core::completion::{CompletionProgress, MSG_TYPE_COMPLETION_UPDATE};

/// A client-invokable hub operation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe the calling connection to a list's group.
    JoinListGroup { list_id: String },
    /// Unsubscribe the calling connection from a list's group.
    LeaveListGroup { list_id: String },
}

/// Build the server push frame for a completion progress event.
///
/// The payload carries the method name and its arguments in order:
/// `(listId, justCompletedIds, completedCount, totalCount)`.
pub fn completion_update_message(progress: &CompletionProgress) -> Message {
    let payload = serde_json::json!({
        "type": MSG_TYPE_COMPLETION_UPDATE,
        "arguments": [
            progress.list_id,
            progress.just_completed_ids,
            progress.completed_count,
            progress.total_count,
        ],
    });
    Message::Text(payload.to_string().into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
