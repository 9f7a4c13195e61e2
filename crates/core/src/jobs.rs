//! Job codes and per-character gear-status classification.
//!
//! Jobs are fixed reference data: the 22 game classes identified by their
//! three-letter code. The `jobs` table is seeded with exactly these codes, in
//! this order, so `Job::ALL` doubles as the canonical ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A character may hold primary gear status on at most this many jobs.
pub const MAX_PRIMARY_GEAR_JOBS: usize = 2;

/// Gear status values as stored in `character_jobs.gear_status`.
pub const GEAR_STATUS_PRIMARY: i16 = 1;
pub const GEAR_STATUS_SECONDARY: i16 = 2;
pub const GEAR_STATUS_NONE: i16 = 3;

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Job {
    War,
    Mnk,
    Whm,
    Blm,
    Rdm,
    Thf,
    Pld,
    Drk,
    Bst,
    Brd,
    Rng,
    Sam,
    Nin,
    Drg,
    Smn,
    Blu,
    Cor,
    Pup,
    Dnc,
    Sch,
    Geo,
    Run,
}

impl Job {
    /// Every job, in seed order.
    pub const ALL: [Job; 22] = [
        Job::War,
        Job::Mnk,
        Job::Whm,
        Job::Blm,
        Job::Rdm,
        Job::Thf,
        Job::Pld,
        Job::Drk,
        Job::Bst,
        Job::Brd,
        Job::Rng,
        Job::Sam,
        Job::Nin,
        Job::Drg,
        Job::Smn,
        Job::Blu,
        Job::Cor,
        Job::Pup,
        Job::Dnc,
        Job::Sch,
        Job::Geo,
        Job::Run,
    ];

    /// The three-letter code, e.g. `"WAR"`.
    pub fn code(self) -> &'static str {
        match self {
            Job::War => "WAR",
            Job::Mnk => "MNK",
            Job::Whm => "WHM",
            Job::Blm => "BLM",
            Job::Rdm => "RDM",
            Job::Thf => "THF",
            Job::Pld => "PLD",
            Job::Drk => "DRK",
            Job::Bst => "BST",
            Job::Brd => "BRD",
            Job::Rng => "RNG",
            Job::Sam => "SAM",
            Job::Nin => "NIN",
            Job::Drg => "DRG",
            Job::Smn => "SMN",
            Job::Blu => "BLU",
            Job::Cor => "COR",
            Job::Pup => "PUP",
            Job::Dnc => "DNC",
            Job::Sch => "SCH",
            Job::Geo => "GEO",
            Job::Run => "RUN",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Job::War => "Warrior",
            Job::Mnk => "Monk",
            Job::Whm => "White Mage",
            Job::Blm => "Black Mage",
            Job::Rdm => "Red Mage",
            Job::Thf => "Thief",
            Job::Pld => "Paladin",
            Job::Drk => "Dark Knight",
            Job::Bst => "Beastmaster",
            Job::Brd => "Bard",
            Job::Rng => "Ranger",
            Job::Sam => "Samurai",
            Job::Nin => "Ninja",
            Job::Drg => "Dragoon",
            Job::Smn => "Summoner",
            Job::Blu => "Blue Mage",
            Job::Cor => "Corsair",
            Job::Pup => "Puppetmaster",
            Job::Dnc => "Dancer",
            Job::Sch => "Scholar",
            Job::Geo => "Geomancer",
            Job::Run => "Rune Fencer",
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Job {
    type Err = CoreError;

    /// Parse a three-letter job code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Job::ALL
            .into_iter()
            .find(|job| job.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::not_found("Job", trimmed))
    }
}

// ---------------------------------------------------------------------------
// GearStatus
// ---------------------------------------------------------------------------

/// Whether a character is actively outfitting a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearStatus {
    Primary,
    Secondary,
    None,
}

impl GearStatus {
    /// Convert from the database SMALLINT value.
    pub fn from_db(value: i16) -> Result<Self, CoreError> {
        match value {
            GEAR_STATUS_PRIMARY => Ok(Self::Primary),
            GEAR_STATUS_SECONDARY => Ok(Self::Secondary),
            GEAR_STATUS_NONE => Ok(Self::None),
            other => Err(CoreError::Validation(format!(
                "Invalid gear status {other}. Must be one of: \
                 {GEAR_STATUS_PRIMARY}, {GEAR_STATUS_SECONDARY}, {GEAR_STATUS_NONE}"
            ))),
        }
    }

    /// Convert to the database SMALLINT value.
    pub fn as_db(self) -> i16 {
        match self {
            Self::Primary => GEAR_STATUS_PRIMARY,
            Self::Secondary => GEAR_STATUS_SECONDARY,
            Self::None => GEAR_STATUS_NONE,
        }
    }
}

// ---------------------------------------------------------------------------
// Primary gear limit
// ---------------------------------------------------------------------------

/// Reject a set of assignments holding more than [`MAX_PRIMARY_GEAR_JOBS`]
/// primary jobs.
pub fn validate_primary_gear_limit(assignments: &[(Job, GearStatus)]) -> Result<(), CoreError> {
    let primary = assignments
        .iter()
        .filter(|(_, status)| *status == GearStatus::Primary)
        .count();
    if primary > MAX_PRIMARY_GEAR_JOBS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_PRIMARY_GEAR_JOBS} jobs may have primary gear status, got {primary}"
        )));
    }
    Ok(())
}

/// Primary jobs beyond the first [`MAX_PRIMARY_GEAR_JOBS`], in input order.
///
/// These are the assignments to demote to secondary when normalising a
/// character that violates the limit.
pub fn excess_primary_jobs(assignments: &[(Job, GearStatus)]) -> Vec<Job> {
    assignments
        .iter()
        .filter(|(_, status)| *status == GearStatus::Primary)
        .skip(MAX_PRIMARY_GEAR_JOBS)
        .map(|(job, _)| *job)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_job_code_case_insensitive() {
        assert_eq!("WHM".parse::<Job>().unwrap(), Job::Whm);
        assert_eq!("sch".parse::<Job>().unwrap(), Job::Sch);
        assert_eq!(" run ".parse::<Job>().unwrap(), Job::Run);
    }

    #[test]
    fn parse_unknown_job_code_is_not_found() {
        let err = "XYZ".parse::<Job>().unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Job", ref key } if key == "XYZ");
    }

    #[test]
    fn codes_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for job in Job::ALL {
            assert_eq!(job.code().parse::<Job>().unwrap(), job);
            assert!(seen.insert(job.code()));
            assert_eq!(job.code().len(), 3);
        }
        assert_eq!(seen.len(), 22);
    }

    #[test]
    fn job_serializes_as_code() {
        assert_eq!(serde_json::to_value(Job::Pld).unwrap(), "PLD");
        let job: Job = serde_json::from_value(serde_json::json!("GEO")).unwrap();
        assert_eq!(job, Job::Geo);
    }

    #[test]
    fn gear_status_db_values() {
        for status in [GearStatus::Primary, GearStatus::Secondary, GearStatus::None] {
            assert_eq!(GearStatus::from_db(status.as_db()).unwrap(), status);
        }
        assert_matches!(GearStatus::from_db(0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn two_primary_jobs_are_within_limit() {
        let assignments = [
            (Job::Whm, GearStatus::Primary),
            (Job::Sch, GearStatus::Primary),
            (Job::Rdm, GearStatus::Secondary),
        ];
        assert!(validate_primary_gear_limit(&assignments).is_ok());
        assert!(excess_primary_jobs(&assignments).is_empty());
    }

    #[test]
    fn third_primary_job_is_excess() {
        let assignments = [
            (Job::War, GearStatus::Primary),
            (Job::Mnk, GearStatus::None),
            (Job::Drk, GearStatus::Primary),
            (Job::Sam, GearStatus::Primary),
            (Job::Drg, GearStatus::Primary),
        ];
        assert_matches!(
            validate_primary_gear_limit(&assignments),
            Err(CoreError::Validation(_))
        );
        assert_eq!(excess_primary_jobs(&assignments), vec![Job::Sam, Job::Drg]);
    }
}
