//! Repository for the `characters` table.

use midguardians_core::loot_board::validate_character_name;
use midguardians_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::character::{Character, CreateCharacter};

const COLUMNS: &str = "id, owner_id, name, created_at, updated_at";

pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a character. Names that are blank or start with `_` are
    /// rejected before reaching the database.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, DbError> {
        validate_character_name(&input.name)?;

        let query = format!(
            "INSERT INTO characters (owner_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
            .map_err(DbError::from)
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE name = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Characters owned by `owner_id`, ordered by name.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE owner_id = $1
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Permanently delete a character. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
