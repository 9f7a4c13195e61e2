//! Loads the read-side state the loot board is built from.
//!
//! Every read in one load shares a single `REPEATABLE READ` transaction so the
//! board never mixes rows from before and after a concurrent write.

use std::collections::HashMap;

use midguardians_core::eligibility::{BossWishlist, CharacterLoot, GearChoices, ZoneChoice};
use midguardians_core::error::CoreError;
use midguardians_core::item_queue::ItemQueue;
use midguardians_core::jobs::{Job, GEAR_STATUS_PRIMARY};
use midguardians_core::loot_tables::{DynamisZone, OmenBoss};
use midguardians_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::models::boss_wishlist::BossWishlistRow;
use crate::models::gear_choice::DynamisGearChoicesRow;
use crate::repositories::ItemQueueRepo;

/// Restricts every query to characters of active owners, optionally to one
/// name. `$1` is the optional name.
const ACTIVE_CHARACTER_FILTER: &str =
    "JOIN users u ON u.id = c.owner_id WHERE u.is_active AND ($1::TEXT IS NULL OR c.name = $1)";

/// Active roster plus every item queue, read at one point in time.
#[derive(Debug, Clone, Default)]
pub struct LootSnapshot {
    pub characters: Vec<CharacterLoot>,
    pub queues: Vec<ItemQueue>,
}

pub struct LootSnapshotRepo;

impl LootSnapshotRepo {
    /// Load the full snapshot for a board build.
    pub async fn load(pool: &PgPool) -> Result<LootSnapshot, DbError> {
        let mut tx = pool.begin().await?;
        begin_snapshot(&mut tx).await?;

        let characters = load_characters(&mut tx, None).await?;
        let queues = ItemQueueRepo::list_all_on(&mut tx).await?;

        tx.commit().await?;
        tracing::debug!(
            characters = characters.len(),
            queues = queues.len(),
            "Loaded loot snapshot"
        );
        Ok(LootSnapshot { characters, queues })
    }

    /// Every character whose owner is active, ordered by name.
    pub async fn load_active_characters(pool: &PgPool) -> Result<Vec<CharacterLoot>, DbError> {
        let mut tx = pool.begin().await?;
        begin_snapshot(&mut tx).await?;
        let characters = load_characters(&mut tx, None).await?;
        tx.commit().await?;
        Ok(characters)
    }

    /// One character by name. `None` if the name is unknown or the owner is
    /// inactive.
    pub async fn load_character(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CharacterLoot>, DbError> {
        let mut tx = pool.begin().await?;
        begin_snapshot(&mut tx).await?;
        let mut characters = load_characters(&mut tx, Some(name)).await?;
        tx.commit().await?;
        Ok(characters.pop())
    }
}

async fn begin_snapshot(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(conn)
        .await
        .map(|_| ())
}

async fn load_characters(
    conn: &mut PgConnection,
    name: Option<&str>,
) -> Result<Vec<CharacterLoot>, DbError> {
    let jobs_by_id = load_job_ids(conn).await?;

    let query =
        format!("SELECT c.id, c.name FROM characters c {ACTIVE_CHARACTER_FILTER} ORDER BY c.name");
    let rows: Vec<(DbId, String)> = sqlx::query_as(&query)
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;

    let mut characters: Vec<CharacterLoot> = Vec::with_capacity(rows.len());
    let mut index: HashMap<DbId, usize> = HashMap::with_capacity(rows.len());
    for (id, character_name) in rows {
        index.insert(id, characters.len());
        characters.push(CharacterLoot::new(character_name));
    }

    // Primary gear jobs, in canonical job order.
    let query = format!(
        "SELECT c.id, j.code
         FROM character_jobs cj
         JOIN jobs j ON j.id = cj.job_id
         JOIN characters c ON c.id = cj.character_id
         {ACTIVE_CHARACTER_FILTER} AND cj.gear_status = {GEAR_STATUS_PRIMARY}
         ORDER BY c.id, j.id"
    );
    let rows: Vec<(DbId, String)> = sqlx::query_as(&query)
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;
    for (id, code) in rows {
        if let Some(&i) = index.get(&id) {
            characters[i].primary_gear_jobs.push(code.parse::<Job>()?);
        }
    }

    let query = format!(
        "SELECT g.character_id,
                g.sandoria_primary, g.sandoria_secondary, g.bastok_primary, g.bastok_secondary,
                g.windurst_primary, g.windurst_secondary, g.jeuno_primary, g.jeuno_secondary,
                g.body_primary, g.body_secondary, g.updated_at
         FROM dynamis_gear_choices g
         JOIN characters c ON c.id = g.character_id
         {ACTIVE_CHARACTER_FILTER}"
    );
    let rows = sqlx::query_as::<_, DynamisGearChoicesRow>(&query)
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;
    for row in rows {
        if let Some(&i) = index.get(&row.character_id) {
            characters[i].gear_choices = Some(gear_choices_from_row(&row, &jobs_by_id)?);
        }
    }

    let query = format!(
        "SELECT w.character_id, w.first_choice, w.second_choice, w.updated_at
         FROM omen_boss_wishlists w
         JOIN characters c ON c.id = w.character_id
         {ACTIVE_CHARACTER_FILTER}"
    );
    let rows = sqlx::query_as::<_, BossWishlistRow>(&query)
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;
    for row in rows {
        if let Some(&i) = index.get(&row.character_id) {
            characters[i].wishlist = Some(wishlist_from_row(&row)?);
        }
    }

    let query = format!(
        "SELECT o.character_id, o.item_name
         FROM obtained_items o
         JOIN characters c ON c.id = o.character_id
         {ACTIVE_CHARACTER_FILTER}"
    );
    let rows: Vec<(DbId, String)> = sqlx::query_as(&query)
        .bind(name)
        .fetch_all(&mut *conn)
        .await?;
    for (id, item) in rows {
        if let Some(&i) = index.get(&id) {
            characters[i].obtained.insert(item);
        }
    }

    Ok(characters)
}

/// `jobs.id` -> `Job`. A code the enum does not know fails the load.
async fn load_job_ids(conn: &mut PgConnection) -> Result<HashMap<DbId, Job>, DbError> {
    let rows: Vec<(DbId, String)> = sqlx::query_as("SELECT id, code FROM jobs")
        .fetch_all(&mut *conn)
        .await?;
    rows.into_iter()
        .map(|(id, code)| -> Result<(DbId, Job), DbError> { Ok((id, code.parse::<Job>()?)) })
        .collect()
}

fn gear_choices_from_row(
    row: &DynamisGearChoicesRow,
    jobs_by_id: &HashMap<DbId, Job>,
) -> Result<GearChoices, CoreError> {
    let lookup = |id: Option<DbId>| -> Result<Option<Job>, CoreError> {
        id.map(|id| {
            jobs_by_id
                .get(&id)
                .copied()
                .ok_or_else(|| CoreError::not_found("Job", id))
        })
        .transpose()
    };

    let mut choices = GearChoices::default();
    for (zone, (primary, secondary)) in DynamisZone::ALL.into_iter().zip(row.zone_job_ids()) {
        *choices.zone_mut(zone) = ZoneChoice {
            primary: lookup(primary)?,
            secondary: lookup(secondary)?,
        };
    }
    Ok(choices)
}

fn wishlist_from_row(row: &BossWishlistRow) -> Result<BossWishlist, CoreError> {
    Ok(BossWishlist {
        first_choice: row.first_choice.map(OmenBoss::from_db).transpose()?,
        second_choice: row.second_choice.map(OmenBoss::from_db).transpose()?,
    })
}
