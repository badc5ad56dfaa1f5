//! Tests for `JobService`: fire-and-forget acceptance, queue drain to
//! quiescence, and shutdown via cancellation.

mod common;

use std::sync::Arc;
use std::time::Duration;

use todo_api::jobs::JobService;
use todo_api::ws::TodoHub;
use tokio_util::sync::CancellationToken;

use common::{drain_updates, MemoryStore};

/// Poll until `condition` holds or the deadline passes.
async fn wait_until<F: Fn() -> bool>(condition: F, deadline: Duration) -> bool {
    let poll = Duration::from_millis(20);
    let mut waited = Duration::ZERO;
    while waited < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(poll).await;
        waited += poll;
    }
    condition()
}

#[tokio::test]
async fn enqueue_returns_immediately_and_job_runs_to_quiescence() {
    let store = MemoryStore::new();
    store.add_item(101, 1, false);
    store.add_item(102, 1, false);

    let hub = Arc::new(TodoHub::new());
    let mut rx = hub.add("subscriber".to_string()).await;
    hub.join_group("1", "subscriber").await;

    let cancel = CancellationToken::new();
    let (jobs, handles) = JobService::start(store.clone(), Arc::clone(&hub), cancel.clone());

    // Returns without blocking on the 100 ms per-item throttle.
    jobs.enqueue_complete_all(1);

    let store_check = store.clone();
    assert!(
        wait_until(move || store_check.all_completed(1), Duration::from_secs(5)).await,
        "job should complete every pending item"
    );

    // Allow the final broadcast (sent just after the last write) to land.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let events = drain_updates(&mut rx);
    assert_eq!(events.first().unwrap().completed_count, 0);
    assert_eq!(events.last().unwrap().completed_count, 2);
    assert_eq!(events.last().unwrap().total_count, 2);

    cancel.cancel();
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn multiple_enqueues_all_drain() {
    let store = MemoryStore::new();
    store.add_item(101, 1, false);
    store.add_item(201, 2, false);

    let hub = Arc::new(TodoHub::new());
    let cancel = CancellationToken::new();
    let (jobs, handles) = JobService::start(store.clone(), Arc::clone(&hub), cancel.clone());

    jobs.enqueue_complete_all(1);
    jobs.enqueue_complete_all(2);

    let store_check = store.clone();
    assert!(
        wait_until(
            move || store_check.all_completed(1) && store_check.all_completed(2),
            Duration::from_secs(5),
        )
        .await
    );

    cancel.cancel();
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn cancellation_stops_all_consumers() {
    let store = MemoryStore::new();
    let hub = Arc::new(TodoHub::new());

    let cancel = CancellationToken::new();
    let (jobs, handles) = JobService::start(store, hub, cancel.clone());

    cancel.cancel();
    for handle in handles {
        handle.await.unwrap();
    }

    // Enqueue after shutdown must not panic; the job is logged and dropped.
    jobs.enqueue_complete_all(1);
}
