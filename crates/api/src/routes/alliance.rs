use axum::routing::post;
use axum::Router;

use crate::handlers::alliance;
use crate::state::AppState;

/// Routes mounted at `/alliances`.
///
/// ```text
/// POST /    -> register_alliance
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(alliance::register_alliance))
}
