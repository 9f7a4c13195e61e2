//! Dynamis gear choices: up to two jobs per zone slot, one row per character.

use midguardians_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `dynamis_gear_choices`. Job columns hold `jobs.id` values.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DynamisGearChoicesRow {
    pub character_id: DbId,
    pub sandoria_primary: Option<DbId>,
    pub sandoria_secondary: Option<DbId>,
    pub bastok_primary: Option<DbId>,
    pub bastok_secondary: Option<DbId>,
    pub windurst_primary: Option<DbId>,
    pub windurst_secondary: Option<DbId>,
    pub jeuno_primary: Option<DbId>,
    pub jeuno_secondary: Option<DbId>,
    pub body_primary: Option<DbId>,
    pub body_secondary: Option<DbId>,
    pub updated_at: Timestamp,
}

impl DynamisGearChoicesRow {
    /// `(primary, secondary)` job ids per zone, in `DynamisZone::ALL` order.
    pub fn zone_job_ids(&self) -> [(Option<DbId>, Option<DbId>); 5] {
        [
            (self.sandoria_primary, self.sandoria_secondary),
            (self.bastok_primary, self.bastok_secondary),
            (self.windurst_primary, self.windurst_secondary),
            (self.jeuno_primary, self.jeuno_secondary),
            (self.body_primary, self.body_secondary),
        ]
    }
}
