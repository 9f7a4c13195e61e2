//! Alliance roster uploads.

use midguardians_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `alliances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alliance {
    pub id: DbId,
    pub zone: String,
    pub registered_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for an alliance roster upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlliance {
    pub zone: String,
    pub character_names: Vec<String>,
}

/// Result of registering an alliance: which submitted names were recorded and
/// which were unknown and skipped.
#[derive(Debug, Clone, Serialize)]
pub struct AllianceRegistration {
    pub alliance: Alliance,
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
}
