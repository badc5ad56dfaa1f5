//! Route definitions for lists, their items, and bulk completion.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{completion, items, lists};
use crate::state::AppState;

/// Routes mounted at `/lists`.
///
/// ```text
/// GET    /                            -> list_all
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// GET    /{id}/items                  -> list_items
/// POST   /{id}/items                  -> create_item
/// GET    /{id}/items/{item_id}        -> get_item
/// PUT    /{id}/items/{item_id}        -> update_item
/// DELETE /{id}/items/{item_id}        -> delete_item
/// POST   /{id}/items:complete-all     -> complete_all_items (202)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::list_all).post(lists::create))
        .route(
            "/{id}",
            get(lists::get_by_id)
                .put(lists::update)
                .delete(lists::delete),
        )
        .route(
            "/{id}/items",
            get(items::list_items).post(items::create_item),
        )
        .route(
            "/{id}/items/{item_id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/{id}/items:complete-all", post(completion::complete_all_items))
}
