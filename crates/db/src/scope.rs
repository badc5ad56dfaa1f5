//! Store scopes for the bulk-completion worker.
//!
//! A scope is a short-lived store handle owned by exactly one task. The
//! worker opens a fresh scope per job instead of resolving one from a
//! process-wide container, so its store dependency is explicit and
//! swappable (the tests run against an in-memory implementation).

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::Postgres;
use todo_core::types::DbId;

use crate::models::item::TodoItem;
use crate::DbPool;

/// Errors surfaced by a store scope.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Read/write operations the completion worker needs from the store.
///
/// Single-item writes are atomic and committed individually; the worker
/// deliberately avoids a multi-item transaction so partial failures still
/// leave persisted progress behind.
#[async_trait]
pub trait TodoScope: Send {
    /// All pending (not completed) items of a list, ordered by ascending
    /// item id. The order is the iteration order of the completion loop.
    async fn load_pending_items(&mut self, list_id: DbId) -> Result<Vec<TodoItem>, StoreError>;

    /// Mark a single item completed and commit. Returns
    /// [`StoreError::NotFound`] if the row vanished since the snapshot.
    async fn complete_item(&mut self, item_id: DbId) -> Result<(), StoreError>;
}

/// Opens store scopes. One scope per background job.
#[async_trait]
pub trait ScopeFactory: Send + Sync + 'static {
    type Scope: TodoScope + Send;

    async fn open_scope(&self) -> Result<Self::Scope, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL implementation
// ---------------------------------------------------------------------------

/// Opens [`PgScope`]s backed by a shared connection pool.
#[derive(Clone)]
pub struct PgScopeFactory {
    pool: DbPool,
}

impl PgScopeFactory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopeFactory for PgScopeFactory {
    type Scope = PgScope;

    async fn open_scope(&self) -> Result<Self::Scope, StoreError> {
        let conn = self.pool.acquire().await?;
        Ok(PgScope { conn })
    }
}

/// A store scope holding a pooled connection for the duration of one job.
pub struct PgScope {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl TodoScope for PgScope {
    async fn load_pending_items(&mut self, list_id: DbId) -> Result<Vec<TodoItem>, StoreError> {
        let items = sqlx::query_as::<_, TodoItem>(
            "SELECT id, list_id, description, completed, created_at, updated_at
             FROM todo_items
             WHERE list_id = $1 AND completed = FALSE
             ORDER BY id ASC",
        )
        .bind(list_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(items)
    }

    async fn complete_item(&mut self, item_id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE todo_items SET completed = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(item_id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "TodoItem",
                id: item_id,
            });
        }
        Ok(())
    }
}
