//! Repository for the `todo_items` table.
//!
//! All item queries are list-scoped: an item is only addressable through
//! the list it belongs to, matching the route layout.

use sqlx::PgPool;
use todo_core::types::DbId;

use crate::models::item::{CreateTodoItem, TodoItem, UpdateTodoItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, list_id, description, completed, created_at, updated_at";

/// Provides CRUD operations for todo items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item into a list, returning the created row.
    pub async fn create(
        pool: &PgPool,
        list_id: DbId,
        input: &CreateTodoItem,
    ) -> Result<TodoItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_items (list_id, description, completed)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(list_id)
            .bind(&input.description)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    /// Find an item within a given list.
    pub async fn find_in_list(
        pool: &PgPool,
        list_id: DbId,
        item_id: DbId,
    ) -> Result<Option<TodoItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_items WHERE list_id = $1 AND id = $2");
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(list_id)
            .bind(item_id)
            .fetch_optional(pool)
            .await
    }

    /// List all items in a list, ordered by ID ascending.
    pub async fn list_by_list(pool: &PgPool, list_id: DbId) -> Result<Vec<TodoItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todo_items
             WHERE list_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    /// Replace an item's description and completed flag.
    ///
    /// Returns `None` if the item does not exist in the given list.
    pub async fn update(
        pool: &PgPool,
        list_id: DbId,
        item_id: DbId,
        input: &UpdateTodoItem,
    ) -> Result<Option<TodoItem>, sqlx::Error> {
        let query = format!(
            "UPDATE todo_items SET description = $3, completed = $4, updated_at = NOW()
             WHERE list_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(list_id)
            .bind(item_id)
            .bind(&input.description)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item from a list. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, list_id: DbId, item_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_items WHERE list_id = $1 AND id = $2")
            .bind(list_id)
            .bind(item_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
