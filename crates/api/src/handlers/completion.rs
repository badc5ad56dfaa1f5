//! Handler for the asynchronous bulk-completion endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use todo_core::error::CoreError;
use todo_core::types::DbId;
use todo_db::repositories::ListRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /lists/{id}/items:complete-all
///
/// Validates the list exists, schedules a background bulk-completion job,
/// and returns 202 before any work begins. Progress is streamed to the
/// list's `/todohub` subscriber group; after the 202 no error from the job
/// ever reaches the client.
pub async fn complete_all_items(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ListRepo::exists(&state.pool, list_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id: list_id,
        }));
    }

    state.jobs.enqueue_complete_all(list_id);

    Ok(StatusCode::ACCEPTED)
}
