//! Repository for `alliances` and `alliance_members`.

use std::collections::{HashMap, HashSet};

use midguardians_core::error::CoreError;
use midguardians_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::alliance::{Alliance, AllianceRegistration, CreateAlliance};

const COLUMNS: &str = "id, zone, registered_by, created_at";

pub struct AllianceRepo;

impl AllianceRepo {
    /// Record a new alliance for `input.zone` with every known character
    /// name as a member.
    ///
    /// Unknown names are skipped rather than rejected; both lists keep the
    /// submitted order. A name submitted twice is registered once.
    pub async fn register(
        pool: &PgPool,
        registered_by: Option<DbId>,
        input: &CreateAlliance,
    ) -> Result<AllianceRegistration, DbError> {
        let zone = input.zone.trim();
        if zone.is_empty() {
            return Err(CoreError::Validation("Zone must not be empty".to_string()).into());
        }

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO alliances (zone, registered_by)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let alliance = sqlx::query_as::<_, Alliance>(&query)
            .bind(zone)
            .bind(registered_by)
            .fetch_one(&mut *tx)
            .await?;

        let rows: Vec<(DbId, String)> =
            sqlx::query_as("SELECT id, name FROM characters WHERE name = ANY($1)")
                .bind(&input.character_names)
                .fetch_all(&mut *tx)
                .await?;
        let ids: HashMap<String, DbId> = rows.into_iter().map(|(id, name)| (name, id)).collect();

        let mut seen = HashSet::new();
        let mut registered = Vec::new();
        let mut skipped = Vec::new();
        for name in &input.character_names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            match ids.get(name) {
                Some(character_id) => {
                    sqlx::query(
                        "INSERT INTO alliance_members (alliance_id, character_id) VALUES ($1, $2)",
                    )
                    .bind(alliance.id)
                    .bind(character_id)
                    .execute(&mut *tx)
                    .await?;
                    registered.push(name.clone());
                }
                None => skipped.push(name.clone()),
            }
        }

        tx.commit().await?;

        tracing::info!(
            alliance_id = alliance.id,
            zone = %alliance.zone,
            registered = registered.len(),
            skipped = skipped.len(),
            "Alliance registered"
        );

        Ok(AllianceRegistration {
            alliance,
            registered,
            skipped,
        })
    }

    /// Member names of an alliance, ordered by name.
    pub async fn list_member_names(
        pool: &PgPool,
        alliance_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT c.name FROM alliance_members m
             JOIN characters c ON c.id = m.character_id
             WHERE m.alliance_id = $1
             ORDER BY c.name",
        )
        .bind(alliance_id)
        .fetch_all(pool)
        .await
    }
}
