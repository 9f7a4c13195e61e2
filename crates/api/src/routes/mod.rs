pub mod admin;
pub mod alliance;
pub mod health;
pub mod loot;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /loot/board                                      full loot board (public)
/// /loot/characters/{name}                          one character's eligibility (public)
/// /loot/queues/{item_name}                         ordered priority queue (public)
///
/// /admin/loot/queues/{item_name}                   reconcile queue (PUT, admin only)
///
/// /alliances                                       roster upload (POST, requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/loot", loot::router())
        .nest("/admin", admin::router())
        .nest("/alliances", alliance::router())
}
