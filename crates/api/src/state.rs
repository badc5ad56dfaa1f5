use std::sync::Arc;

use crate::config::ServerConfig;
use crate::jobs::JobService;
use crate::ws::TodoHub;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: todo_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Realtime hub for per-list subscriber groups.
    pub hub: Arc<TodoHub>,
    /// Handle for enqueueing bulk-completion jobs.
    pub jobs: JobService,
}
