//! Handlers for the `/lists` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use todo_core::error::CoreError;
use todo_core::types::DbId;
use todo_core::validation::validate_list_name;
use todo_db::models::list::{CreateTodoList, TodoList, UpdateTodoList};
use todo_db::repositories::ListRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /lists
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTodoList>,
) -> AppResult<(StatusCode, Json<TodoList>)> {
    validate_list_name(&input.name)?;

    let list = ListRepo::create(&state.pool, &input).await?;

    tracing::info!(list_id = list.id, "List created");
    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /lists
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<TodoList>>> {
    let lists = ListRepo::list_all(&state.pool).await?;
    Ok(Json(lists))
}

/// GET /lists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<Json<TodoList>> {
    let list = ListRepo::find_by_id(&state.pool, list_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id: list_id,
        }))?;

    Ok(Json(list))
}

/// PUT /lists/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<UpdateTodoList>,
) -> AppResult<Json<TodoList>> {
    validate_list_name(&input.name)?;

    let list = ListRepo::update(&state.pool, list_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id: list_id,
        }))?;

    Ok(Json(list))
}

/// DELETE /lists/{id}
///
/// Items cascade at the schema level.
pub async fn delete(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ListRepo::delete(&state.pool, list_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id: list_id,
        }));
    }

    tracing::info!(list_id, "List deleted");
    Ok(StatusCode::NO_CONTENT)
}
