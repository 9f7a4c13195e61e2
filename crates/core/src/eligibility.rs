//! Per-character loot eligibility.
//!
//! A character's eligibility is derived from three independent facets:
//! primary gear jobs (general loot), per-zone Dynamis gear choices, and the
//! Omen boss wishlist. Items the character already obtained are then
//! subtracted by name.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::jobs::Job;
use crate::loot_tables::{DynamisZone, LootTables, OmenBoss};

pub const REASON_FIRST_SCALE: &str = "Omen scale choices (first choice)";
pub const REASON_SECOND_SCALE: &str = "Omen scale choices (second choice)";

// ---------------------------------------------------------------------------
// Input model
// ---------------------------------------------------------------------------

/// Up to two job selections for one Dynamis zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneChoice {
    pub primary: Option<Job>,
    pub secondary: Option<Job>,
}

impl ZoneChoice {
    pub fn jobs(&self) -> impl Iterator<Item = Job> {
        self.primary.into_iter().chain(self.secondary)
    }
}

/// A character's Dynamis gear choices across all five zone slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearChoices {
    pub sandoria: ZoneChoice,
    pub bastok: ZoneChoice,
    pub windurst: ZoneChoice,
    pub jeuno: ZoneChoice,
    pub body: ZoneChoice,
}

impl GearChoices {
    pub fn zone(&self, zone: DynamisZone) -> &ZoneChoice {
        match zone {
            DynamisZone::Sandoria => &self.sandoria,
            DynamisZone::Bastok => &self.bastok,
            DynamisZone::Windurst => &self.windurst,
            DynamisZone::Jeuno => &self.jeuno,
            DynamisZone::Body => &self.body,
        }
    }

    pub fn zone_mut(&mut self, zone: DynamisZone) -> &mut ZoneChoice {
        match zone {
            DynamisZone::Sandoria => &mut self.sandoria,
            DynamisZone::Bastok => &mut self.bastok,
            DynamisZone::Windurst => &mut self.windurst,
            DynamisZone::Jeuno => &mut self.jeuno,
            DynamisZone::Body => &mut self.body,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossWishlist {
    pub first_choice: Option<OmenBoss>,
    pub second_choice: Option<OmenBoss>,
}

/// Everything the engine needs to know about one character.
///
/// `gear_choices` and `wishlist` are `None` when the character never saved
/// those forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterLoot {
    pub name: String,
    pub primary_gear_jobs: Vec<Job>,
    pub gear_choices: Option<GearChoices>,
    pub wishlist: Option<BossWishlist>,
    pub obtained: HashSet<String>,
}

impl CharacterLoot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// An item a character may receive, and why.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EligibleItem {
    pub item: String,
    pub reason: String,
}

impl EligibleItem {
    fn new(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Every (item, reason) pair the character is eligible for, before removing
/// obtained items.
///
/// An item may appear more than once with different reasons, e.g. when both
/// primary jobs can use it.
pub fn derive_eligibility(character: &CharacterLoot) -> Result<BTreeSet<EligibleItem>, CoreError> {
    derive_with_tables(LootTables::get(), character)
}

fn derive_with_tables(
    tables: &LootTables,
    character: &CharacterLoot,
) -> Result<BTreeSet<EligibleItem>, CoreError> {
    let mut result = BTreeSet::new();

    for job in &character.primary_gear_jobs {
        let reason = format!("primary gear job: {job}");
        for item in tables.general_loot_for(*job)? {
            result.insert(EligibleItem::new(*item, reason.as_str()));
        }
    }

    if let Some(choices) = &character.gear_choices {
        for zone in DynamisZone::ALL {
            for job in choices.zone(zone).jobs() {
                for item in zone.item_names(job) {
                    result.insert(EligibleItem::new(item, zone.reason()));
                }
            }
        }
    }

    if let Some(wishlist) = &character.wishlist {
        if let Some(boss) = wishlist.first_choice {
            result.insert(EligibleItem::new(boss.scale_item(), REASON_FIRST_SCALE));
        }
        if let Some(boss) = wishlist.second_choice {
            result.insert(EligibleItem::new(boss.scale_item(), REASON_SECOND_SCALE));
        }
    }

    Ok(result)
}

/// Drop every eligible entry whose item name the character already obtained.
pub fn filter_obtained(
    eligible: BTreeSet<EligibleItem>,
    obtained: &HashSet<String>,
) -> BTreeSet<EligibleItem> {
    eligible
        .into_iter()
        .filter(|entry| !obtained.contains(&entry.item))
        .collect()
}

/// Derived eligibility minus the character's own obtained items.
pub fn remaining_eligibility(
    character: &CharacterLoot,
) -> Result<BTreeSet<EligibleItem>, CoreError> {
    Ok(filter_obtained(
        derive_eligibility(character)?,
        &character.obtained,
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::loot_tables::GeneralLootDrop;

    fn items(set: &BTreeSet<EligibleItem>) -> BTreeSet<&str> {
        set.iter().map(|e| e.item.as_str()).collect()
    }

    #[test]
    fn unconfigured_character_is_eligible_for_nothing() {
        let character = CharacterLoot::new("Nobody");
        assert!(derive_eligibility(&character).unwrap().is_empty());
    }

    #[test]
    fn empty_forms_are_eligible_for_nothing() {
        let mut character = CharacterLoot::new("Blank");
        character.gear_choices = Some(GearChoices::default());
        character.wishlist = Some(BossWishlist::default());
        assert!(derive_eligibility(&character).unwrap().is_empty());
    }

    #[test]
    fn primary_job_grants_general_loot() {
        let mut character = CharacterLoot::new("Miaw");
        character.primary_gear_jobs = vec![Job::Whm];

        let eligible = derive_eligibility(&character).unwrap();
        assert!(eligible.contains(&EligibleItem::new(
            "Ammurapi shield",
            "primary gear job: WHM"
        )));
        assert!(items(&eligible).contains("Shamash robe"));
        assert!(!items(&eligible).iter().any(|i| i.contains("shard")));
    }

    #[test]
    fn shared_item_keeps_one_entry_per_job() {
        let mut character = CharacterLoot::new("Twin");
        character.primary_gear_jobs = vec![Job::Whm, Job::Rdm];

        let eligible = derive_eligibility(&character).unwrap();
        let ammurapi: Vec<_> = eligible
            .iter()
            .filter(|e| e.item == "Ammurapi shield")
            .collect();
        assert_eq!(ammurapi.len(), 2);
    }

    #[test]
    fn zone_choice_grants_shard_and_void() {
        let mut character = CharacterLoot::new("Svedin");
        let mut choices = GearChoices::default();
        choices.sandoria.primary = Some(Job::Pld);
        character.gear_choices = Some(choices);

        let eligible = derive_eligibility(&character).unwrap();
        assert_eq!(
            items(&eligible),
            BTreeSet::from(["Footshard: PLD", "Voidfoot: PLD"])
        );
        assert!(eligible
            .iter()
            .all(|e| e.reason == "Dynamis San d'Oria settings"));
    }

    #[test]
    fn secondary_zone_choice_counts() {
        let mut character = CharacterLoot::new("Alt");
        let mut choices = GearChoices::default();
        choices.zone_mut(DynamisZone::Body).secondary = Some(Job::Geo);
        character.gear_choices = Some(choices);

        let eligible = derive_eligibility(&character).unwrap();
        assert_eq!(
            items(&eligible),
            BTreeSet::from(["Torsoshard: GEO", "Voidtorso: GEO"])
        );
    }

    #[test]
    fn wishlist_first_choice_only() {
        let mut character = CharacterLoot::new("Kerian");
        character.wishlist = Some(BossWishlist {
            first_choice: Some(OmenBoss::Kin),
            second_choice: None,
        });

        let eligible = derive_eligibility(&character).unwrap();
        assert_eq!(eligible.len(), 1);
        assert!(eligible.contains(&EligibleItem::new("Kin's Scale", REASON_FIRST_SCALE)));
    }

    #[test]
    fn wishlist_second_choice_has_its_own_reason() {
        let mut character = CharacterLoot::new("Kerian");
        character.wishlist = Some(BossWishlist {
            first_choice: Some(OmenBoss::Kei),
            second_choice: Some(OmenBoss::Gin),
        });

        let eligible = derive_eligibility(&character).unwrap();
        assert!(eligible.contains(&EligibleItem::new("Gin's Scale", REASON_SECOND_SCALE)));
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn missing_table_entry_fails_derivation() {
        let tables = LootTables::index(&[GeneralLootDrop {
            item: "Regal gem",
            source: "Ou",
            jobs: &[Job::Rdm],
        }]);
        let mut character = CharacterLoot::new("Broken");
        character.primary_gear_jobs = vec![Job::War];

        assert_matches!(
            derive_with_tables(&tables, &character),
            Err(CoreError::NotFound { .. })
        );
    }

    #[test]
    fn obtained_items_are_removed_by_name() {
        let mut character = CharacterLoot::new("Miaw");
        character.primary_gear_jobs = vec![Job::Whm, Job::Rdm];
        character.obtained = HashSet::from(["Ammurapi shield".to_string()]);

        let remaining = remaining_eligibility(&character).unwrap();
        assert!(!items(&remaining).contains("Ammurapi shield"));
        assert!(items(&remaining).contains("Shamash robe"));
    }

    #[test]
    fn filtered_set_never_contains_obtained_names() {
        let mut character = CharacterLoot::new("Everything");
        character.primary_gear_jobs = vec![Job::Run, Job::Blu];
        let mut choices = GearChoices::default();
        for zone in DynamisZone::ALL {
            choices.zone_mut(zone).primary = Some(Job::Run);
            choices.zone_mut(zone).secondary = Some(Job::Blu);
        }
        character.gear_choices = Some(choices);

        let derived = derive_eligibility(&character).unwrap();
        let obtained: HashSet<String> = derived
            .iter()
            .step_by(3)
            .map(|e| e.item.clone())
            .collect();

        let remaining = filter_obtained(derived, &obtained);
        assert!(!remaining.is_empty());
        assert!(remaining.iter().all(|e| !obtained.contains(&e.item)));
    }
}
