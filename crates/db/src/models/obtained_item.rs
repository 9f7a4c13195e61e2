use midguardians_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An item a character has already received.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObtainedItem {
    pub id: DbId,
    pub character_id: DbId,
    pub item_name: String,
    pub obtained_at: Timestamp,
}

/// DTO for recording an obtained item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateObtainedItem {
    pub character_id: DbId,
    pub item_name: String,
}
