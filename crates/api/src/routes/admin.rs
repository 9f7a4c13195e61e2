//! Route definitions for administrator endpoints.

use axum::routing::put;
use axum::Router;

use crate::handlers::item_queue;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the admin role.
///
/// ```text
/// PUT /loot/queues/{item_name}    -> reconcile_queue
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/loot/queues/{item_name}", put(item_queue::reconcile_queue))
}
