use midguardians_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `omen_boss_wishlists`. Choices are boss ids 1..=5.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BossWishlistRow {
    pub character_id: DbId,
    pub first_choice: Option<i16>,
    pub second_choice: Option<i16>,
    pub updated_at: Timestamp,
}
