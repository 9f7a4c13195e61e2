//! Administrator handler for rewriting an item's priority queue.

use axum::extract::{Path, State};
use axum::Json;
use midguardians_core::item_queue::ItemQueue;
use midguardians_db::repositories::ItemQueueRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Full desired queue order for one item.
#[derive(Debug, Deserialize)]
pub struct ReconcileQueueRequest {
    pub character_names: Vec<String>,
}

/// PUT /api/v1/admin/loot/queues/{item_name}
///
/// Replace the queue with exactly `character_names`, in order. The whole
/// rewrite is applied or nothing is.
pub async fn reconcile_queue(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(item_name): Path<String>,
    Json(input): Json<ReconcileQueueRequest>,
) -> AppResult<Json<DataResponse<ItemQueue>>> {
    let queue = ItemQueueRepo::reconcile(&state.pool, &item_name, &input.character_names).await?;

    tracing::info!(
        user_id = admin.user_id,
        item = %item_name,
        members = queue.members.len(),
        "Priority queue updated"
    );

    Ok(Json(DataResponse { data: queue }))
}
