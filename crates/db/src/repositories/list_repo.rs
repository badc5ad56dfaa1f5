//! Repository for the `todo_lists` table.

use sqlx::PgPool;
use todo_core::types::DbId;

use crate::models::list::{CreateTodoList, TodoList, UpdateTodoList};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for todo lists.
pub struct ListRepo;

impl ListRepo {
    /// Insert a new list, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTodoList) -> Result<TodoList, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_lists (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a list by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TodoList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_lists WHERE id = $1");
        sqlx::query_as::<_, TodoList>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all lists, ordered by creation ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<TodoList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_lists ORDER BY id ASC");
        sqlx::query_as::<_, TodoList>(&query).fetch_all(pool).await
    }

    /// Check whether a list with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todo_lists WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Rename a list. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodoList,
    ) -> Result<Option<TodoList>, sqlx::Error> {
        let query = format!(
            "UPDATE todo_lists SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a list by ID. Items cascade at the schema level.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
