//! PostgreSQL persistence for the todo backend.
//!
//! Provides pool construction, embedded migrations, row models,
//! repositories for the synchronous CRUD surface, and the store-scope
//! abstraction the bulk-completion worker runs against.

pub mod models;
pub mod repositories;
pub mod scope;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable with a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::debug!("Applying pending database migrations");
    sqlx::migrate!("./migrations").run(pool).await
}
