//! Progress events for the bulk-completion subsystem.
//!
//! A completion job emits one [`CompletionProgress`] per step: a single
//! initial announcement carrying the snapshot size, then one event per
//! persisted item. There is no distinct terminal event; observers detect
//! completion via [`CompletionProgress::is_final`].

use serde::Serialize;

use crate::types::DbId;

/// WebSocket method name for completion progress pushes.
///
/// Used in `api/src/ws/protocol.rs` when broadcasting job progress to
/// subscribers of a list group.
pub const MSG_TYPE_COMPLETION_UPDATE: &str = "ReceiveTodoCompletionUpdate";

/// One step of a bulk-completion job's progress stream.
///
/// Invariant: `0 <= completed_count <= total_count`. The initial
/// announcement carries no ids and a zero count; every subsequent event
/// carries exactly one item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionProgress {
    /// The list the job is completing.
    pub list_id: DbId,
    /// Item ids persisted by this step (empty for the announcement,
    /// exactly one entry afterwards). Stringified for transport.
    pub just_completed_ids: Vec<String>,
    /// Items persisted so far, including this step.
    pub completed_count: i32,
    /// Size of the pending snapshot the job is working through.
    pub total_count: i32,
}

impl CompletionProgress {
    /// The initial announcement: `(list_id, [], 0, total_count)`.
    ///
    /// Emitted exactly once per job, before any per-item event.
    pub fn announcement(list_id: DbId, total_count: i32) -> Self {
        Self {
            list_id,
            just_completed_ids: Vec::new(),
            completed_count: 0,
            total_count,
        }
    }

    /// A per-item progress event carrying the single id just persisted.
    pub fn item_completed(
        list_id: DbId,
        item_id: DbId,
        completed_count: i32,
        total_count: i32,
    ) -> Self {
        Self {
            list_id,
            just_completed_ids: vec![item_id.to_string()],
            completed_count,
            total_count,
        }
    }

    /// Whether this event marks the end of its job's stream.
    ///
    /// True for the announcement of an empty snapshot (`0/0`) as well.
    pub fn is_final(&self) -> bool {
        self.completed_count == self.total_count
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
