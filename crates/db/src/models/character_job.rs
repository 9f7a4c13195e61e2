//! Job assignments per character.

use midguardians_core::jobs::Job;
use midguardians_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `character_jobs` row joined with the job code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterJob {
    pub id: DbId,
    pub character_id: DbId,
    pub job_code: String,
    pub level: Option<i16>,
    pub mastered: bool,
    /// 1 = primary, 2 = secondary, 3 = not gearing.
    pub gear_status: i16,
}

/// DTO for assigning a job to a character (insert or update).
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertCharacterJob {
    pub job: Job,
    pub level: Option<i16>,
    #[serde(default)]
    pub mastered: bool,
    pub gear_status: i16,
}
