//! Route definitions for the public `/loot` read endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::loot;
use crate::state::AppState;

/// Routes mounted at `/loot`.
///
/// ```text
/// GET /board                   -> get_board
/// GET /characters/{name}       -> get_character
/// GET /queues/{item_name}      -> get_queue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/board", get(loot::get_board))
        .route("/characters/{name}", get(loot::get_character))
        .route("/queues/{item_name}", get(loot::get_queue))
}
