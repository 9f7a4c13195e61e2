//! Repository for the `omen_boss_wishlists` table.

use midguardians_core::eligibility::BossWishlist;
use midguardians_core::types::DbId;
use sqlx::PgPool;

use crate::models::boss_wishlist::BossWishlistRow;

const COLUMNS: &str = "character_id, first_choice, second_choice, updated_at";

pub struct BossWishlistRepo;

impl BossWishlistRepo {
    pub async fn find_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Option<BossWishlistRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM omen_boss_wishlists WHERE character_id = $1");
        sqlx::query_as::<_, BossWishlistRow>(&query)
            .bind(character_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace a character's wishlist.
    pub async fn upsert(
        pool: &PgPool,
        character_id: DbId,
        wishlist: &BossWishlist,
    ) -> Result<BossWishlistRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO omen_boss_wishlists (character_id, first_choice, second_choice)
             VALUES ($1, $2, $3)
             ON CONFLICT (character_id) DO UPDATE SET
                first_choice = EXCLUDED.first_choice,
                second_choice = EXCLUDED.second_choice,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BossWishlistRow>(&query)
            .bind(character_id)
            .bind(wishlist.first_choice.map(|b| b.as_db()))
            .bind(wishlist.second_choice.map(|b| b.as_db()))
            .fetch_one(pool)
            .await
    }
}
