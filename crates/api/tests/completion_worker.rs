//! End-to-end tests for `CompletionWorker` against the in-memory store.
//!
//! Each test wires a hub subscriber to a list group, runs one (or more)
//! jobs to completion, and asserts on the exact event stream and the final
//! store state.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use todo_api::jobs::CompletionWorker;
use todo_api::ws::TodoHub;
use todo_db::scope::StoreError;

use common::{decode_update, drain_updates, MemoryStore};

async fn subscribed_hub(list_id: &str) -> (Arc<TodoHub>, tokio::sync::mpsc::UnboundedReceiver<axum::extract::ws::Message>) {
    let hub = Arc::new(TodoHub::new());
    let rx = hub.add("subscriber".to_string()).await;
    hub.join_group(list_id, "subscriber").await;
    (hub, rx)
}

// ---------------------------------------------------------------------------
// Scenario: mixed pending/completed list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completes_pending_items_in_id_order_with_full_stream() {
    let store = MemoryStore::new();
    store.add_item(101, 1, false);
    store.add_item(102, 1, true);
    store.add_item(103, 1, false);

    let (hub, mut rx) = subscribed_hub("1").await;
    let worker = CompletionWorker::new(store.clone(), hub);

    worker.complete_all(1).await.unwrap();

    let events = drain_updates(&mut rx);
    assert_eq!(events.len(), 3);

    // Initial announcement: no ids, zero count, snapshot total.
    assert_eq!(events[0].list_id, 1);
    assert!(events[0].just_completed_ids.is_empty());
    assert_eq!(events[0].completed_count, 0);
    assert_eq!(events[0].total_count, 2);

    // Per-item events in ascending id order, monotonically counting up.
    assert_eq!(events[1].just_completed_ids, vec!["101".to_string()]);
    assert_eq!(events[1].completed_count, 1);
    assert_eq!(events[2].just_completed_ids, vec!["103".to_string()]);
    assert_eq!(events[2].completed_count, 2);
    assert_eq!(events[2].total_count, 2);

    // Store: both pending items completed, the already-completed one untouched.
    assert!(store.is_completed(101));
    assert!(store.is_completed(102));
    assert!(store.is_completed(103));
}

#[tokio::test]
async fn every_event_respects_count_bounds() {
    let store = MemoryStore::new();
    for item_id in 201..=205 {
        store.add_item(item_id, 2, false);
    }

    let (hub, mut rx) = subscribed_hub("2").await;
    CompletionWorker::new(store, hub).complete_all(2).await.unwrap();

    let events = drain_updates(&mut rx);
    assert_eq!(events.len(), 6);

    let mut previous = -1;
    for event in &events {
        assert!(event.completed_count >= 0);
        assert!(event.completed_count <= event.total_count);
        assert!(event.completed_count > previous, "counts must strictly increase");
        previous = event.completed_count;
    }
    assert_eq!(events.last().unwrap().completed_count, 5);
}

// ---------------------------------------------------------------------------
// Scenario: empty list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_list_emits_single_zero_announcement() {
    let store = MemoryStore::new();

    let (hub, mut rx) = subscribed_hub("7").await;
    CompletionWorker::new(store, hub).complete_all(7).await.unwrap();

    let events = drain_updates(&mut rx);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].list_id, 7);
    assert!(events[0].just_completed_ids.is_empty());
    assert_eq!(events[0].completed_count, 0);
    assert_eq!(events[0].total_count, 0);
}

// ---------------------------------------------------------------------------
// Scenario: item vanishes between snapshot and commit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vanished_item_is_still_counted() {
    let store = MemoryStore::new();
    store.add_item(301, 3, false);
    store.add_item(302, 3, false);
    store.vanish_at_commit(301);

    let (hub, mut rx) = subscribed_hub("3").await;
    CompletionWorker::new(store.clone(), hub).complete_all(3).await.unwrap();

    let events = drain_updates(&mut rx);
    assert_eq!(events.len(), 3);

    // The vanished item still appears in the stream and the counter still
    // converges to total.
    assert_eq!(events[1].just_completed_ids, vec!["301".to_string()]);
    assert_eq!(events[2].completed_count, 2);
    assert_eq!(events[2].total_count, 2);

    assert!(store.is_completed(302));
}

// ---------------------------------------------------------------------------
// Scenario: two jobs back to back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_job_sees_empty_snapshot_and_never_recompletes() {
    let store = MemoryStore::new();
    store.add_item(301, 3, false);
    store.add_item(302, 3, false);

    let (hub, mut rx) = subscribed_hub("3").await;
    let worker = CompletionWorker::new(store.clone(), hub);

    worker.complete_all(3).await.unwrap();
    worker.complete_all(3).await.unwrap();

    let events = drain_updates(&mut rx);

    // First stream: announcement + 2 items. Second stream: 0/0 announcement.
    assert_eq!(events.len(), 4);
    assert_eq!(events[3].total_count, 0);
    assert!(events[3].just_completed_ids.is_empty());

    // No item id appears twice across both streams.
    let all_ids: Vec<&String> = events
        .iter()
        .flat_map(|e| e.just_completed_ids.iter())
        .collect();
    assert_eq!(all_ids.len(), 2);
    assert!(all_ids.contains(&&"301".to_string()));
    assert!(all_ids.contains(&&"302".to_string()));
}

// ---------------------------------------------------------------------------
// Scenario: fatal store failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fatal_open_error_aborts_without_events() {
    let store = MemoryStore::new();
    store.add_item(401, 4, false);
    store.fail_open();

    let (hub, mut rx) = subscribed_hub("4").await;
    let result = CompletionWorker::new(store, hub).complete_all(4).await;

    assert_matches!(result, Err(StoreError::Unavailable(_)));
    assert!(drain_updates(&mut rx).is_empty());
}

#[tokio::test]
async fn job_for_deleted_list_still_emits_the_empty_announcement() {
    let store = MemoryStore::new();

    // List 42 never existed (or was deleted after enqueue). The pending
    // snapshot is empty, and the announcement is unconditional.
    let (hub, mut rx) = subscribed_hub("42").await;
    let result = CompletionWorker::new(store, hub).complete_all(42).await;

    assert_matches!(result, Ok(()));

    let events = drain_updates(&mut rx);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].list_id, 42);
    assert!(events[0].just_completed_ids.is_empty());
    assert_eq!(events[0].completed_count, 0);
    assert_eq!(events[0].total_count, 0);
}

// ---------------------------------------------------------------------------
// Scenario: late subscriber
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscriber_joining_mid_stream_receives_only_the_suffix() {
    let store = MemoryStore::new();
    store.add_item(201, 2, false);
    store.add_item(202, 2, false);
    store.add_item(203, 2, false);

    let hub = Arc::new(TodoHub::new());
    let mut observer_rx = hub.add("observer".to_string()).await;
    hub.join_group("2", "observer").await;

    let job_hub = Arc::clone(&hub);
    let job_store = store.clone();
    let job = tokio::spawn(async move {
        CompletionWorker::new(job_store, job_hub).complete_all(2).await
    });

    // Wait until the observer has seen the first per-item event, then join.
    loop {
        let msg = observer_rx.recv().await.expect("stream ended early");
        if decode_update(msg).just_completed_ids == vec!["201".to_string()] {
            break;
        }
    }
    let mut late_rx = hub.add("late".to_string()).await;
    hub.join_group("2", "late").await;

    job.await.unwrap().unwrap();

    // The late joiner missed the announcement and the first item's event;
    // everything it did receive is a per-item suffix ending at 3/3.
    let events = drain_updates(&mut late_rx);
    assert!(!events.is_empty());
    for event in &events {
        assert_eq!(event.just_completed_ids.len(), 1);
        assert_ne!(event.just_completed_ids[0], "201");
    }
    assert_eq!(events.last().unwrap().completed_count, 3);
    assert_eq!(events.last().unwrap().total_count, 3);
}

#[tokio::test]
async fn subscriber_joining_after_completion_receives_nothing() {
    let store = MemoryStore::new();
    store.add_item(601, 6, false);

    let hub = Arc::new(TodoHub::new());
    CompletionWorker::new(store, Arc::clone(&hub))
        .complete_all(6)
        .await
        .unwrap();

    let mut rx = hub.add("late".to_string()).await;
    hub.join_group("6", "late").await;

    assert!(drain_updates(&mut rx).is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// For any pending item set: the stream opens with the `(_, [], 0,
        /// total)` announcement, counts increase strictly and stay within
        /// `0 ..= total`, and every item ends up persisted as completed.
        ///
        /// Runs on a paused-clock runtime so the per-item throttle costs no
        /// wall time.
        #[test]
        fn any_pending_set_yields_a_monotonic_bounded_stream(
            item_ids in proptest::collection::btree_set(1i64..10_000, 0..10),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap();

            runtime.block_on(async {
                let store = MemoryStore::new();
                for &item_id in &item_ids {
                    store.add_item(item_id, 1, false);
                }

                let (hub, mut rx) = subscribed_hub("1").await;
                CompletionWorker::new(store.clone(), hub)
                    .complete_all(1)
                    .await
                    .unwrap();

                let events = drain_updates(&mut rx);
                let total = item_ids.len() as i64;

                prop_assert_eq!(events.len(), item_ids.len() + 1);
                prop_assert!(events[0].just_completed_ids.is_empty());
                prop_assert_eq!(events[0].completed_count, 0);

                let mut previous = -1;
                for event in &events {
                    prop_assert!(event.completed_count > previous);
                    prop_assert!(event.completed_count <= event.total_count);
                    prop_assert_eq!(event.total_count, total);
                    previous = event.completed_count;
                }
                prop_assert_eq!(events.last().unwrap().completed_count, total);

                prop_assert!(store.all_completed(1));
                Ok(())
            })?;
        }
    }
}
