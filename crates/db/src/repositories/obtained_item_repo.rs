//! Repository for the `obtained_items` table.

use midguardians_core::types::DbId;
use sqlx::PgPool;

use crate::models::obtained_item::{CreateObtainedItem, ObtainedItem};

const COLUMNS: &str = "id, character_id, item_name, obtained_at";

pub struct ObtainedItemRepo;

impl ObtainedItemRepo {
    /// Record that a character received an item. Recording the same item
    /// twice keeps the original row.
    pub async fn record(
        pool: &PgPool,
        input: &CreateObtainedItem,
    ) -> Result<ObtainedItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO obtained_items (character_id, item_name)
             VALUES ($1, $2)
             ON CONFLICT (character_id, item_name) DO UPDATE SET item_name = EXCLUDED.item_name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ObtainedItem>(&query)
            .bind(input.character_id)
            .bind(&input.item_name)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<ObtainedItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM obtained_items
             WHERE character_id = $1
             ORDER BY item_name"
        );
        sqlx::query_as::<_, ObtainedItem>(&query)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        character_id: DbId,
        item_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM obtained_items WHERE character_id = $1 AND item_name = $2")
                .bind(character_id)
                .bind(item_name)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
