//! Job acceptance and scheduling for bulk completion.
//!
//! A bounded mpsc channel feeds a fixed pool of long-lived consumer
//! tasks, each owning a [`CompletionWorker`]. This bounds concurrency and
//! gives shutdown a handle, while keeping enqueue non-blocking.

use std::sync::Arc;

use todo_core::types::{DbId, Timestamp};
use todo_db::scope::ScopeFactory;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::jobs::CompletionWorker;
use crate::ws::TodoHub;

/// Maximum number of jobs waiting in the queue.
pub const JOB_QUEUE_DEPTH: usize = 64;

/// Number of long-lived consumer tasks executing jobs.
pub const COMPLETION_WORKER_COUNT: usize = 4;

/// An accepted bulk-completion request. Lives only in process memory.
#[derive(Debug, Clone)]
pub struct CompletionJob {
    pub list_id: DbId,
    pub enqueued_at: Timestamp,
}

/// Accepts enqueue requests and hands them to the consumer pool.
///
/// Cheaply cloneable; the handlers hold one via [`AppState`].
///
/// [`AppState`]: crate::state::AppState
#[derive(Clone)]
pub struct JobService {
    tx: mpsc::Sender<CompletionJob>,
}

impl JobService {
    /// Spawn the consumer pool and return the service handle plus the
    /// consumer task handles (awaited during shutdown).
    ///
    /// Consumers stop when `cancel` fires or when every `JobService`
    /// clone has been dropped.
    pub fn start<F>(
        scopes: F,
        hub: Arc<TodoHub>,
        cancel: CancellationToken,
    ) -> (Self, Vec<JoinHandle<()>>)
    where
        F: ScopeFactory + Clone,
    {
        let (tx, rx) = mpsc::channel(JOB_QUEUE_DEPTH);
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(COMPLETION_WORKER_COUNT);
        for worker_id in 0..COMPLETION_WORKER_COUNT {
            let worker = CompletionWorker::new(scopes.clone(), Arc::clone(&hub));
            let rx = Arc::clone(&rx);
            let cancel = cancel.clone();
            handles.push(tokio::spawn(consume_jobs(worker_id, worker, rx, cancel)));
        }

        (Self { tx }, handles)
    }

    /// Schedule a bulk-completion job for a list and return immediately.
    ///
    /// Fire-and-forget: never blocks and never surfaces an error. A full
    /// or closed queue is logged and the job dropped.
    pub fn enqueue_complete_all(&self, list_id: DbId) {
        let job = CompletionJob {
            list_id,
            enqueued_at: chrono::Utc::now(),
        };

        match self.tx.try_send(job) {
            Ok(()) => {
                tracing::debug!(list_id, "Enqueued bulk-completion job");
            }
            Err(mpsc::error::TrySendError::Full(job)) => {
                tracing::warn!(list_id = job.list_id, "Job queue full, dropping job");
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                tracing::warn!(list_id = job.list_id, "Job queue closed, dropping job");
            }
        }
    }
}

/// Consumer loop: take jobs off the shared queue until cancellation or
/// queue closure, logging (and dropping) any worker error.
async fn consume_jobs<F: ScopeFactory>(
    worker_id: usize,
    worker: CompletionWorker<F>,
    rx: Arc<Mutex<mpsc::Receiver<CompletionJob>>>,
    cancel: CancellationToken,
) {
    loop {
        // Hold the lock only while waiting for the next job so the other
        // consumers can take over between jobs.
        let job = {
            let mut rx = rx.lock().await;
            tokio::select! {
                job = rx.recv() => job,
                () = cancel.cancelled() => None,
            }
        };

        let Some(job) = job else {
            tracing::debug!(worker_id, "Completion consumer stopping");
            break;
        };

        let queue_wait_ms = (chrono::Utc::now() - job.enqueued_at).num_milliseconds();
        tracing::info!(
            worker_id,
            list_id = job.list_id,
            queue_wait_ms,
            "Picked up bulk-completion job",
        );

        if let Err(e) = worker.complete_all(job.list_id).await {
            tracing::error!(
                worker_id,
                list_id = job.list_id,
                error = %e,
                "Bulk-completion job failed",
            );
        }
    }
}
