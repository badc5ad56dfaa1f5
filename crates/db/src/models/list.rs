//! Todo list models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};

/// A row from the `todo_lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TodoList {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoList {
    pub name: String,
}

/// DTO for renaming a list.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoList {
    pub name: String,
}
