pub mod health;
pub mod lists;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the application route tree (health is mounted separately).
///
/// Route hierarchy:
///
/// ```text
/// /todohub                                  WebSocket upgrade
///
/// /lists                                    list, create
/// /lists/{id}                               get, update, delete
/// /lists/{id}/items                         list, create
/// /lists/{id}/items/{item_id}               get, update, delete
/// /lists/{id}/items:complete-all            enqueue bulk completion (202)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/todohub", get(ws::ws_handler))
        .nest("/lists", lists::router())
}
