//! Repository for the `dynamis_gear_choices` table.

use midguardians_core::eligibility::GearChoices;
use midguardians_core::loot_tables::DynamisZone;
use midguardians_core::types::DbId;
use sqlx::PgPool;

use crate::models::gear_choice::DynamisGearChoicesRow;

const COLUMNS: &str = "character_id, \
    sandoria_primary, sandoria_secondary, bastok_primary, bastok_secondary, \
    windurst_primary, windurst_secondary, jeuno_primary, jeuno_secondary, \
    body_primary, body_secondary, updated_at";

pub struct GearChoiceRepo;

impl GearChoiceRepo {
    pub async fn find_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Option<DynamisGearChoicesRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dynamis_gear_choices WHERE character_id = $1");
        sqlx::query_as::<_, DynamisGearChoicesRow>(&query)
            .bind(character_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or fully replace a character's gear choices.
    ///
    /// Job codes are resolved to `jobs.id` inside the statement; unset slots
    /// are stored as NULL.
    pub async fn upsert(
        pool: &PgPool,
        character_id: DbId,
        choices: &GearChoices,
    ) -> Result<DynamisGearChoicesRow, sqlx::Error> {
        let codes: Vec<Option<&'static str>> = DynamisZone::ALL
            .into_iter()
            .flat_map(|zone| {
                let slot = choices.zone(zone);
                [slot.primary.map(|j| j.code()), slot.secondary.map(|j| j.code())]
            })
            .collect();

        let query = format!(
            "INSERT INTO dynamis_gear_choices (
                character_id,
                sandoria_primary, sandoria_secondary, bastok_primary, bastok_secondary,
                windurst_primary, windurst_secondary, jeuno_primary, jeuno_secondary,
                body_primary, body_secondary
             )
             SELECT $1,
                (SELECT id FROM jobs WHERE code = $2),
                (SELECT id FROM jobs WHERE code = $3),
                (SELECT id FROM jobs WHERE code = $4),
                (SELECT id FROM jobs WHERE code = $5),
                (SELECT id FROM jobs WHERE code = $6),
                (SELECT id FROM jobs WHERE code = $7),
                (SELECT id FROM jobs WHERE code = $8),
                (SELECT id FROM jobs WHERE code = $9),
                (SELECT id FROM jobs WHERE code = $10),
                (SELECT id FROM jobs WHERE code = $11)
             ON CONFLICT (character_id) DO UPDATE SET
                sandoria_primary = EXCLUDED.sandoria_primary,
                sandoria_secondary = EXCLUDED.sandoria_secondary,
                bastok_primary = EXCLUDED.bastok_primary,
                bastok_secondary = EXCLUDED.bastok_secondary,
                windurst_primary = EXCLUDED.windurst_primary,
                windurst_secondary = EXCLUDED.windurst_secondary,
                jeuno_primary = EXCLUDED.jeuno_primary,
                jeuno_secondary = EXCLUDED.jeuno_secondary,
                body_primary = EXCLUDED.body_primary,
                body_secondary = EXCLUDED.body_secondary,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );

        let mut q = sqlx::query_as::<_, DynamisGearChoicesRow>(&query).bind(character_id);
        for code in codes {
            q = q.bind(code);
        }
        q.fetch_one(pool).await
    }
}
