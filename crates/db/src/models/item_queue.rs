//! Priority queue rows.

use midguardians_core::item_queue::QueueMember;
use midguardians_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `item_queues`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemQueueRow {
    pub id: DbId,
    pub item_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A queue position joined with its item and character names.
#[derive(Debug, Clone, FromRow)]
pub struct QueuePositionRow {
    pub item_name: String,
    pub character_id: DbId,
    pub character_name: String,
    pub position: i32,
}

impl From<QueuePositionRow> for QueueMember {
    fn from(row: QueuePositionRow) -> Self {
        QueueMember {
            character_id: row.character_id,
            character_name: row.character_name,
            position: row.position,
        }
    }
}
