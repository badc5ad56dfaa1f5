//! Handlers for the `/lists/{id}/items` resource.
//!
//! Every operation verifies the parent list first and returns 404 when it
//! is missing, so an item is never addressable through the wrong list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use todo_core::error::CoreError;
use todo_core::types::DbId;
use todo_core::validation::validate_description;
use todo_db::models::item::{CreateTodoItem, TodoItem, UpdateTodoItem};
use todo_db::repositories::{ItemRepo, ListRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /lists/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<Json<Vec<TodoItem>>> {
    ensure_list_exists(&state, list_id).await?;

    let items = ItemRepo::list_by_list(&state.pool, list_id).await?;
    Ok(Json(items))
}

/// GET /lists/{id}/items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TodoItem>> {
    ensure_list_exists(&state, list_id).await?;

    let item = ItemRepo::find_in_list(&state.pool, list_id, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoItem",
            id: item_id,
        }))?;

    Ok(Json(item))
}

/// POST /lists/{id}/items
pub async fn create_item(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<CreateTodoItem>,
) -> AppResult<(StatusCode, Json<TodoItem>)> {
    ensure_list_exists(&state, list_id).await?;
    validate_description(&input.description)?;

    let item = ItemRepo::create(&state.pool, list_id, &input).await?;

    tracing::info!(list_id, item_id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /lists/{id}/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTodoItem>,
) -> AppResult<Json<TodoItem>> {
    ensure_list_exists(&state, list_id).await?;
    validate_description(&input.description)?;

    let item = ItemRepo::update(&state.pool, list_id, item_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoItem",
            id: item_id,
        }))?;

    Ok(Json(item))
}

/// DELETE /lists/{id}/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_list_exists(&state, list_id).await?;

    let deleted = ItemRepo::delete(&state.pool, list_id, item_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoItem",
            id: item_id,
        }));
    }

    tracing::info!(list_id, item_id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 404 unless the parent list exists.
async fn ensure_list_exists(state: &AppState, list_id: DbId) -> AppResult<()> {
    if !ListRepo::exists(&state.pool, list_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id: list_id,
        }));
    }
    Ok(())
}
