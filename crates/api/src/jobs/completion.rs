//! The bulk-completion worker.
//!
//! One [`CompletionWorker::complete_all`] call executes a single job: load
//! the pending snapshot of a list, persist each item's completion one at a
//! time, and stream progress to the list's subscriber group after every
//! step.

use std::sync::Arc;
use std::time::Duration;

use todo_core::completion::CompletionProgress;
use todo_core::types::DbId;
use todo_db::scope::{ScopeFactory, StoreError, TodoScope};

use crate::ws::TodoHub;

/// Wall-clock delay between per-item commits, in milliseconds.
///
/// This paces the progress stream so subscribers observe a visible
/// sequence of updates and the transport is never saturated by a tight
/// loop. It is part of the observable contract, not a tuning knob.
pub const ITEM_COMPLETION_DELAY_MS: u64 = 100;

/// Executes one bulk-completion job end to end.
///
/// Dependencies are passed in explicitly: a factory for per-job store
/// scopes and a handle to the realtime hub. Generic over the factory so
/// tests can supply an in-memory store.
pub struct CompletionWorker<F: ScopeFactory> {
    scopes: F,
    hub: Arc<TodoHub>,
}

impl<F: ScopeFactory> CompletionWorker<F> {
    pub fn new(scopes: F, hub: Arc<TodoHub>) -> Self {
        Self { scopes, hub }
    }

    /// Complete every pending item of a list, streaming progress.
    ///
    /// Event stream, in order:
    /// 1. The initial announcement `(list_id, [], 0, total)`.
    /// 2. One `(list_id, [item_id], done, total)` per item, after a 100 ms
    ///    delay and a committed single-item write.
    ///
    /// There is no terminal event; subscribers detect completion via
    /// `completed_count == total_count`. An item that vanished between the
    /// snapshot and its commit is logged and still counted, so the
    /// subscriber's counter always converges to `total`. A list deleted
    /// between enqueue and execution yields an empty snapshot, so only the
    /// `0/0` announcement is emitted.
    ///
    /// Returns an error only for fatal store failures (scope open or
    /// snapshot load); in that case no further events are emitted and
    /// subscribers observe a stalled stream.
    pub async fn complete_all(&self, list_id: DbId) -> Result<(), StoreError> {
        let mut scope = self.scopes.open_scope().await?;

        let items = scope.load_pending_items(list_id).await?;
        let total_count = items.len() as i32;
        let mut completed_count = 0;

        tracing::info!(list_id, total_count, "Starting bulk completion");

        let announcement = CompletionProgress::announcement(list_id, total_count);
        self.hub.broadcast_completion(&announcement).await;
        if announcement.is_final() {
            tracing::info!(list_id, "No pending items, job complete");
            return Ok(());
        }

        for item in items {
            tokio::time::sleep(Duration::from_millis(ITEM_COMPLETION_DELAY_MS)).await;

            match scope.complete_item(item.id).await {
                Ok(()) => {}
                Err(StoreError::NotFound { .. }) => {
                    // The item was deleted since the snapshot; it no longer
                    // needs completing, so count it as done.
                    tracing::warn!(list_id, item_id = item.id, "Item vanished before commit");
                }
                Err(e) => {
                    tracing::error!(
                        list_id,
                        item_id = item.id,
                        error = %e,
                        "Failed to persist item completion, continuing",
                    );
                }
            }

            completed_count += 1;
            self.hub
                .broadcast_completion(&CompletionProgress::item_completed(
                    list_id,
                    item.id,
                    completed_count,
                    total_count,
                ))
                .await;
        }

        tracing::info!(list_id, completed_count, "Bulk completion finished");
        Ok(())
    }
}
