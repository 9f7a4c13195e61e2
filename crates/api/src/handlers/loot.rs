//! Public read handlers for the loot board.

use axum::extract::{Path, State};
use axum::Json;
use midguardians_core::eligibility::{remaining_eligibility, EligibleItem};
use midguardians_core::error::CoreError;
use midguardians_core::item_queue::character_has_priority;
use midguardians_core::loot_board::{build_board, LootBoard};
use midguardians_db::repositories::{ItemQueueRepo, LootSnapshotRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One character's remaining eligibility.
#[derive(Debug, Serialize)]
pub struct CharacterEligibility {
    pub name: String,
    /// Sorted by item name, then reason.
    pub items: Vec<EligibleItem>,
    /// Items whose priority queue lists this character, by item name.
    pub priority: Vec<String>,
}

/// Ordered priority queue for one item.
#[derive(Debug, Serialize)]
pub struct QueueView {
    pub item_name: String,
    /// Character names in claim order; empty when no queue exists.
    pub characters: Vec<String>,
}

/// GET /api/v1/loot/board
///
/// Full board over every active character and every queue. Published as the
/// bare item mapping, without the `data` envelope.
pub async fn get_board(State(state): State<AppState>) -> AppResult<Json<LootBoard>> {
    let snapshot = LootSnapshotRepo::load(&state.pool).await?;
    let board = build_board(&snapshot.characters, &snapshot.queues)?;

    tracing::debug!(
        items = board.len(),
        characters = snapshot.characters.len(),
        "Built loot board"
    );

    Ok(Json(board))
}

/// GET /api/v1/loot/characters/{name}
///
/// Items the character can still receive, with reasons, plus the queues the
/// character holds a position in. 404 for unknown names and for characters
/// whose owner is inactive.
pub async fn get_character(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<CharacterEligibility>>> {
    let character = LootSnapshotRepo::load_character(&state.pool, &name)
        .await?
        .ok_or_else(|| CoreError::not_found("Character", &name))?;

    let items = remaining_eligibility(&character)?.into_iter().collect();
    let priority = ItemQueueRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .filter(|queue| character_has_priority(queue, &character.name))
        .map(|queue| queue.item_name)
        .collect();

    Ok(Json(DataResponse {
        data: CharacterEligibility {
            name: character.name,
            items,
            priority,
        },
    }))
}

/// GET /api/v1/loot/queues/{item_name}
pub async fn get_queue(
    State(state): State<AppState>,
    Path(item_name): Path<String>,
) -> AppResult<Json<DataResponse<QueueView>>> {
    let characters = ItemQueueRepo::find_by_item(&state.pool, &item_name)
        .await?
        .map(|queue| queue.ordered_names())
        .unwrap_or_default();

    Ok(Json(DataResponse {
        data: QueueView {
            item_name,
            characters,
        },
    }))
}
