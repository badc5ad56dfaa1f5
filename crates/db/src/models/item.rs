//! Todo item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};

/// A row from the `todo_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TodoItem {
    pub id: DbId,
    pub list_id: DbId,
    pub description: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item. `completed` defaults to false.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoItem {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// DTO for updating an item. Both fields are required, matching the
/// PUT-replaces semantics of the item endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoItem {
    pub description: String,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_item_completed_defaults_to_false() {
        let input: CreateTodoItem =
            serde_json::from_str(r#"{ "description": "Buy milk" }"#).unwrap();

        assert_eq!(input.description, "Buy milk");
        assert!(!input.completed);
    }

    #[test]
    fn create_item_accepts_explicit_completed() {
        let input: CreateTodoItem =
            serde_json::from_str(r#"{ "description": "Done already", "completed": true }"#)
                .unwrap();

        assert!(input.completed);
    }
}
