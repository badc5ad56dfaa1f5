//! Shared test fixtures: an in-memory store implementing the scope traits
//! and helpers for decoding hub frames.
//!
//! The completion worker is generic over [`ScopeFactory`], so these tests
//! exercise the full job pipeline without a live database.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::ws::Message;
use todo_core::types::DbId;
use todo_db::models::item::TodoItem;
use todo_db::scope::{ScopeFactory, StoreError, TodoScope};

#[derive(Default)]
struct MemoryState {
    /// BTreeMap keeps snapshot order ascending by item id.
    items: BTreeMap<DbId, TodoItem>,
    /// Items that vanish between the snapshot and their commit.
    vanished: HashSet<DbId>,
    fail_open: bool,
}

/// In-memory store; acts as both factory and scope.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&self, item_id: DbId, list_id: DbId, completed: bool) {
        let now = chrono::Utc::now();
        self.state.lock().unwrap().items.insert(
            item_id,
            TodoItem {
                id: item_id,
                list_id,
                description: format!("item {item_id}"),
                completed,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Make `complete_item` fail with `NotFound` for this item, as if it
    /// was deleted after the snapshot was taken.
    pub fn vanish_at_commit(&self, item_id: DbId) {
        self.state.lock().unwrap().vanished.insert(item_id);
    }

    /// Make `open_scope` fail, simulating an unreachable store.
    pub fn fail_open(&self) {
        self.state.lock().unwrap().fail_open = true;
    }

    pub fn is_completed(&self, item_id: DbId) -> bool {
        self.state.lock().unwrap().items[&item_id].completed
    }

    pub fn all_completed(&self, list_id: DbId) -> bool {
        self.state
            .lock()
            .unwrap()
            .items
            .values()
            .filter(|item| item.list_id == list_id)
            .all(|item| item.completed)
    }
}

#[async_trait]
impl TodoScope for MemoryStore {
    async fn load_pending_items(&mut self, list_id: DbId) -> Result<Vec<TodoItem>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .values()
            .filter(|item| item.list_id == list_id && !item.completed)
            .cloned()
            .collect())
    }

    async fn complete_item(&mut self, item_id: DbId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.vanished.contains(&item_id) {
            return Err(StoreError::NotFound {
                entity: "TodoItem",
                id: item_id,
            });
        }
        match state.items.get_mut(&item_id) {
            Some(item) => {
                item.completed = true;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "TodoItem",
                id: item_id,
            }),
        }
    }
}

#[async_trait]
impl ScopeFactory for MemoryStore {
    type Scope = MemoryStore;

    async fn open_scope(&self) -> Result<Self::Scope, StoreError> {
        if self.state.lock().unwrap().fail_open {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        Ok(self.clone())
    }
}

/// A decoded `ReceiveTodoCompletionUpdate` frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedUpdate {
    pub list_id: i64,
    pub just_completed_ids: Vec<String>,
    pub completed_count: i64,
    pub total_count: i64,
}

/// Decode a hub frame, panicking on anything that is not a completion
/// update in the expected shape.
pub fn decode_update(msg: Message) -> ReceivedUpdate {
    let Message::Text(text) = msg else {
        panic!("Expected a Text frame, got: {msg:?}");
    };
    let value: serde_json::Value = serde_json::from_str(&text).expect("frame should be JSON");
    assert_eq!(value["type"], "ReceiveTodoCompletionUpdate");

    let args = value["arguments"]
        .as_array()
        .expect("arguments should be an array");
    assert_eq!(args.len(), 4);

    ReceivedUpdate {
        list_id: args[0].as_i64().unwrap(),
        just_completed_ids: args[1]
            .as_array()
            .unwrap()
            .iter()
            .map(|id| id.as_str().unwrap().to_string())
            .collect(),
        completed_count: args[2].as_i64().unwrap(),
        total_count: args[3].as_i64().unwrap(),
    }
}

/// Drain every frame currently buffered on a receiver into decoded updates.
pub fn drain_updates(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<Message>,
) -> Vec<ReceivedUpdate> {
    let mut updates = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        updates.push(decode_update(msg));
    }
    updates
}
