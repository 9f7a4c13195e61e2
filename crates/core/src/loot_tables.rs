//! Static loot rule tables.
//!
//! Three independent sources of loot eligibility:
//!
//! - **General loot**: named drops from Omen bosses and Odyssey NMs, each
//!   usable by a fixed set of jobs. Characters are eligible through their
//!   primary gear jobs.
//! - **Dynamis zones**: every zone drops a shard and a void item per job,
//!   named from a per-zone template. Characters are eligible through their
//!   per-zone gear choices.
//! - **Omen scales**: one scale per boss group, chosen through the boss
//!   wishlist.
//!
//! The literal table is indexed once into a job -> items lookup on first use
//! and shared read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::jobs::Job;

use Job::*;

// ---------------------------------------------------------------------------
// General loot literal table
// ---------------------------------------------------------------------------

/// One named drop and the jobs that can use it.
#[derive(Debug, Clone, Copy)]
pub struct GeneralLootDrop {
    pub item: &'static str,
    /// Boss or NM that drops the item.
    pub source: &'static str,
    pub jobs: &'static [Job],
}

pub const GENERAL_LOOT: &[GeneralLootDrop] = &[
    GeneralLootDrop {
        item: "Niqmaddu ring",
        source: "Fu",
        jobs: &[War, Mnk, Drk, Sam, Drg, Pup, Run],
    },
    GeneralLootDrop {
        item: "Shulmanu collar",
        source: "Fu",
        jobs: &[Bst, Drg, Smn, Pup],
    },
    GeneralLootDrop {
        item: "Nisroch jerkin",
        source: "Fu",
        jobs: &[Bst, Drg, Smn, Pup],
    },
    GeneralLootDrop {
        item: "Enmerkar earring",
        source: "Kyou",
        jobs: &[Bst, Drg, Smn, Pup],
    },
    GeneralLootDrop {
        item: "Iskur gorget",
        source: "Kyou",
        jobs: &[Thf, Rng, Nin, Cor],
    },
    GeneralLootDrop {
        item: "Udug jacket",
        source: "Kyou",
        jobs: &[Bst, Smn, Pup],
    },
    GeneralLootDrop {
        item: "Ammurapi shield",
        source: "Kei",
        jobs: &[Whm, Blm, Rdm, Brd, Smn, Sch, Geo],
    },
    GeneralLootDrop {
        item: "Lugalbanda earring",
        source: "Kei",
        jobs: &[Blm, Smn, Sch, Geo],
    },
    GeneralLootDrop {
        item: "Shamash robe",
        source: "Kei",
        jobs: &[Whm, Blm, Rdm, Blu, Sch, Geo],
    },
    GeneralLootDrop {
        item: "Yamarang",
        source: "Gin",
        jobs: &[Thf, Nin, Dnc, Run],
    },
    GeneralLootDrop {
        item: "Dingir ring",
        source: "Gin",
        jobs: &[Thf, Rng, Nin, Cor],
    },
    GeneralLootDrop {
        item: "Ashera harness",
        source: "Gin",
        jobs: &[Mnk, Thf, Brd, Nin, Dnc, Run],
    },
    GeneralLootDrop {
        item: "Utu grip",
        source: "Kin",
        jobs: &[War, Drk, Sam, Drg, Run],
    },
    GeneralLootDrop {
        item: "Ilabrat ring",
        source: "Kin",
        jobs: &[
            Mnk, Whm, Rdm, Thf, Bst, Brd, Rng, Sam, Nin, Blu, Cor, Dnc, Run,
        ],
    },
    GeneralLootDrop {
        item: "Dagon breastplate",
        source: "Kin",
        jobs: &[War, Pld, Drk, Sam, Drg],
    },
    GeneralLootDrop {
        item: "Regal belt",
        source: "Ou",
        jobs: &[Smn],
    },
    GeneralLootDrop {
        item: "Regal captain's gloves",
        source: "Ou",
        jobs: &[War, Mnk, Drk, Sam, Pup],
    },
    GeneralLootDrop {
        item: "Regal cuffs",
        source: "Ou",
        jobs: &[Whm, Blm, Rdm, Smn, Blu, Sch, Geo],
    },
    GeneralLootDrop {
        item: "Regal earring",
        source: "Ou",
        jobs: &[Whm, Blm, Rdm, Brd, Blu, Sch, Geo],
    },
    GeneralLootDrop {
        item: "Regal gauntlets",
        source: "Ou",
        jobs: &[Pld, Run],
    },
    GeneralLootDrop {
        item: "Regal gem",
        source: "Ou",
        jobs: &[Rdm],
    },
    GeneralLootDrop {
        item: "Regal gloves",
        source: "Ou",
        jobs: &[Thf, Bst, Brd, Rng, Nin, Drg, Cor, Dnc],
    },
    GeneralLootDrop {
        item: "Regal necklace",
        source: "Ou",
        jobs: &[Cor],
    },
    GeneralLootDrop {
        item: "Regal ring",
        source: "Ou",
        jobs: &[
            War, Mnk, Thf, Pld, Drk, Bst, Rng, Sam, Nin, Drg, Cor, Pup, Dnc, Run,
        ],
    },
    GeneralLootDrop {
        item: "Nusku shield",
        source: "Glassy Craver",
        jobs: &[Rng, Cor],
    },
    GeneralLootDrop {
        item: "Sherida earring",
        source: "Glassy Craver",
        jobs: &[Mnk, Rdm, Thf, Bst, Rng, Drg, Dnc, Run],
    },
    GeneralLootDrop {
        item: "Anu torque",
        source: "Glassy Craver",
        jobs: &[Mnk, Rdm, Thf, Bst, Rng, Drg, Dnc, Run],
    },
    GeneralLootDrop {
        item: "Kishar ring",
        source: "Glassy Gorger",
        jobs: &[
            Whm, Blm, Rdm, Pld, Drk, Brd, Nin, Smn, Blu, Cor, Sch, Geo, Run,
        ],
    },
    GeneralLootDrop {
        item: "Enki strap",
        source: "Glassy Gorger",
        jobs: &[Whm, Blm, Rdm, Brd, Smn, Sch, Geo],
    },
    GeneralLootDrop {
        item: "Erra pendant",
        source: "Glassy Gorger",
        jobs: &[Whm, Blm, Rdm, Pld, Drk, Smn, Blu, Sch, Geo, Run],
    },
    GeneralLootDrop {
        item: "Adad amulet",
        source: "Glassy Thinker",
        jobs: &[Bst, Drg, Smn, Pup],
    },
    GeneralLootDrop {
        item: "Knobkierrie",
        source: "Glassy Thinker",
        jobs: &[War, Mnk, Drk, Sam, Drg, Run],
    },
    GeneralLootDrop {
        item: "Adapa shield",
        source: "Glassy Thinker",
        jobs: &[War, Drk, Bst],
    },
];

// ---------------------------------------------------------------------------
// Dynamis zones
// ---------------------------------------------------------------------------

/// A Dynamis gear-choice slot. `Body` drops in every zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamisZone {
    Sandoria,
    Bastok,
    Windurst,
    Jeuno,
    Body,
}

impl DynamisZone {
    pub const ALL: [DynamisZone; 5] = [
        DynamisZone::Sandoria,
        DynamisZone::Bastok,
        DynamisZone::Windurst,
        DynamisZone::Jeuno,
        DynamisZone::Body,
    ];

    pub fn shard_name(self) -> &'static str {
        match self {
            Self::Sandoria => "Footshard",
            Self::Bastok => "Headshard",
            Self::Windurst => "Handshard",
            Self::Jeuno => "Legshard",
            Self::Body => "Torsoshard",
        }
    }

    pub fn void_name(self) -> &'static str {
        match self {
            Self::Sandoria => "Voidfoot",
            Self::Bastok => "Voidhead",
            Self::Windurst => "Voidhand",
            Self::Jeuno => "Voidleg",
            Self::Body => "Voidtorso",
        }
    }

    /// Reason label attached to eligibility derived from this zone.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Sandoria => "Dynamis San d'Oria settings",
            Self::Bastok => "Dynamis Bastok settings",
            Self::Windurst => "Dynamis Windurst settings",
            Self::Jeuno => "Dynamis Jeuno settings",
            Self::Body => "Dynamis body settings",
        }
    }

    /// The two item names a job selection in this zone produces.
    pub fn item_names(self, job: Job) -> [String; 2] {
        [
            format!("{}: {}", self.shard_name(), job.code()),
            format!("{}: {}", self.void_name(), job.code()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Omen bosses and scales
// ---------------------------------------------------------------------------

/// Omen boss group, stored as SMALLINT 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmenBoss {
    Fu,
    Kyou,
    Kei,
    Gin,
    Kin,
}

impl OmenBoss {
    pub const ALL: [OmenBoss; 5] = [
        OmenBoss::Fu,
        OmenBoss::Kyou,
        OmenBoss::Kei,
        OmenBoss::Gin,
        OmenBoss::Kin,
    ];

    pub fn from_db(value: i16) -> Result<Self, CoreError> {
        match value {
            1 => Ok(Self::Fu),
            2 => Ok(Self::Kyou),
            3 => Ok(Self::Kei),
            4 => Ok(Self::Gin),
            5 => Ok(Self::Kin),
            other => Err(CoreError::not_found("OmenBoss", other)),
        }
    }

    pub fn as_db(self) -> i16 {
        match self {
            Self::Fu => 1,
            Self::Kyou => 2,
            Self::Kei => 3,
            Self::Gin => 4,
            Self::Kin => 5,
        }
    }

    /// The scale item tied to this boss group.
    pub fn scale_item(self) -> &'static str {
        match self {
            Self::Fu => "Fu's Scale",
            Self::Kyou => "Kyou's Scale",
            Self::Kei => "Kei's Scale",
            Self::Gin => "Gin's Scale",
            Self::Kin => "Kin's Scale",
        }
    }
}

// ---------------------------------------------------------------------------
// Indexed lookup
// ---------------------------------------------------------------------------

static LOOT_TABLES: LazyLock<LootTables> = LazyLock::new(|| LootTables::index(GENERAL_LOOT));

/// Job -> general loot index derived from [`GENERAL_LOOT`].
#[derive(Debug)]
pub struct LootTables {
    by_job: BTreeMap<Job, Vec<&'static str>>,
    general_items: BTreeSet<&'static str>,
}

impl LootTables {
    /// The process-wide tables.
    pub fn get() -> &'static LootTables {
        &LOOT_TABLES
    }

    pub(crate) fn index(drops: &[GeneralLootDrop]) -> Self {
        let mut by_job: BTreeMap<Job, Vec<&'static str>> = BTreeMap::new();
        let mut general_items = BTreeSet::new();
        for drop in drops {
            general_items.insert(drop.item);
            for job in drop.jobs {
                by_job.entry(*job).or_default().push(drop.item);
            }
        }
        Self {
            by_job,
            general_items,
        }
    }

    /// Check the tables are complete and unambiguous. Called once at startup;
    /// an error is fatal.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(job) = Job::ALL.into_iter().find(|j| !self.by_job.contains_key(j)) {
            return Err(CoreError::Internal(format!(
                "General loot table has no entry for job {job}"
            )));
        }

        let mut seen = BTreeSet::new();
        for drop in GENERAL_LOOT {
            if !seen.insert(drop.item) {
                return Err(CoreError::Internal(format!(
                    "General loot item '{}' is listed twice",
                    drop.item
                )));
            }
        }

        let templated: BTreeSet<String> = templated_items().collect();
        if let Some(item) = self
            .general_items
            .iter()
            .find(|item| templated.contains(**item))
        {
            return Err(CoreError::Internal(format!(
                "General loot item '{item}' collides with a zone or scale item"
            )));
        }
        Ok(())
    }

    /// General loot items usable by `job`.
    pub fn general_loot_for(&self, job: Job) -> Result<&[&'static str], CoreError> {
        self.by_job
            .get(&job)
            .map(Vec::as_slice)
            .ok_or_else(|| CoreError::not_found("General loot entry", job))
    }

    /// Every known item name: general loot, every job x zone template, and the
    /// five scales.
    pub fn item_universe(&self) -> BTreeSet<String> {
        self.general_items
            .iter()
            .map(|item| (*item).to_string())
            .chain(templated_items())
            .collect()
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.general_items.contains(item) || templated_items().any(|name| name == item)
    }
}

/// Zone template and scale item names.
fn templated_items() -> impl Iterator<Item = String> {
    DynamisZone::ALL
        .into_iter()
        .flat_map(|zone| Job::ALL.into_iter().flat_map(move |job| zone.item_names(job)))
        .chain(OmenBoss::ALL.into_iter().map(|boss| boss.scale_item().to_string()))
}
