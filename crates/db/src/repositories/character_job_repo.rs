//! Repository for the `character_jobs` table.

use midguardians_core::error::CoreError;
use midguardians_core::jobs::{self, GearStatus, Job};
use midguardians_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::character_job::{CharacterJob, UpsertCharacterJob};

/// `character_jobs` columns joined with `jobs.code`.
const JOINED_COLUMNS: &str =
    "cj.id, cj.character_id, j.code AS job_code, cj.level, cj.mastered, cj.gear_status";

pub struct CharacterJobRepo;

impl CharacterJobRepo {
    /// Insert or update a character's assignment for one job.
    pub async fn upsert(
        pool: &PgPool,
        character_id: DbId,
        input: &UpsertCharacterJob,
    ) -> Result<CharacterJob, sqlx::Error> {
        let query = format!(
            "WITH upserted AS (
                INSERT INTO character_jobs (character_id, job_id, level, mastered, gear_status)
                SELECT $1, j.id, $3, $4, $5 FROM jobs j WHERE j.code = $2
                ON CONFLICT (character_id, job_id) DO UPDATE SET
                    level = EXCLUDED.level,
                    mastered = EXCLUDED.mastered,
                    gear_status = EXCLUDED.gear_status
                RETURNING *
             )
             SELECT {JOINED_COLUMNS}
             FROM upserted cj
             JOIN jobs j ON j.id = cj.job_id"
        );
        sqlx::query_as::<_, CharacterJob>(&query)
            .bind(character_id)
            .bind(input.job.code())
            .bind(input.level)
            .bind(input.mastered)
            .bind(input.gear_status)
            .fetch_one(pool)
            .await
    }

    /// All assignments for a character, in job seed order.
    pub async fn list_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<CharacterJob>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM character_jobs cj
             JOIN jobs j ON j.id = cj.job_id
             WHERE cj.character_id = $1
             ORDER BY j.id"
        );
        sqlx::query_as::<_, CharacterJob>(&query)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// Demote primary gear jobs beyond the allowed two to secondary.
    ///
    /// The first two primary jobs in job order are kept. Returns the demoted
    /// jobs (empty when the character was already within the limit).
    pub async fn limit_primary_gear_jobs(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<Job>, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM character_jobs cj
             JOIN jobs j ON j.id = cj.job_id
             WHERE cj.character_id = $1
             ORDER BY j.id
             FOR UPDATE OF cj"
        );
        let rows = sqlx::query_as::<_, CharacterJob>(&query)
            .bind(character_id)
            .fetch_all(&mut *tx)
            .await?;

        let assignments = rows
            .iter()
            .map(|row| -> Result<(Job, GearStatus), CoreError> {
                Ok((row.job_code.parse()?, GearStatus::from_db(row.gear_status)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if jobs::validate_primary_gear_limit(&assignments).is_ok() {
            return Ok(Vec::new());
        }

        let demoted = jobs::excess_primary_jobs(&assignments);
        for job in &demoted {
            tracing::info!(character_id, job = %job, "Demoting primary gear job to secondary");
            sqlx::query(
                "UPDATE character_jobs cj SET gear_status = $3
                 FROM jobs j
                 WHERE j.id = cj.job_id AND cj.character_id = $1 AND j.code = $2",
            )
            .bind(character_id)
            .bind(job.code())
            .bind(GearStatus::Secondary.as_db())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(demoted)
    }
}
