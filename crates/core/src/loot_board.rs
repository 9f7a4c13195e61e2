//! Aggregate loot board.
//!
//! Combines every active character's remaining eligibility with the priority
//! queues into one snapshot keyed by item name. The board is derived on
//! demand and never stored.
//!
//! Serialized shape:
//!
//! ```text
//! {
//!   "Ammurapi shield": { "Miaw": true, "Kerian": true, "_priority": ["Kerian"] },
//!   "Footshard: WAR": {}
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::eligibility::{remaining_eligibility, CharacterLoot};
use crate::error::CoreError;
use crate::item_queue::ItemQueue;
use crate::loot_tables::LootTables;

/// Reserved key holding the ordered priority queue inside an item entry.
pub const PRIORITY_KEY: &str = "_priority";

/// Prefix no character name may start with. Keeps [`PRIORITY_KEY`] and any
/// later board metadata keys apart from character keys.
pub const RESERVED_NAME_PREFIX: char = '_';

/// Check a character name can be used as a board key.
pub fn validate_character_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Character name must not be empty".to_string(),
        ));
    }
    if name.starts_with(RESERVED_NAME_PREFIX) {
        return Err(CoreError::Validation(format!(
            "Character name '{name}' must not start with '{RESERVED_NAME_PREFIX}'"
        )));
    }
    Ok(())
}

/// Board state for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LootBoardEntry {
    /// Characters who can lot on the item without priority.
    pub eligible: BTreeSet<String>,
    /// Priority claim order, present only when the item has a queue.
    pub priority: Option<Vec<String>>,
}

impl Serialize for LootBoardEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.eligible.len() + usize::from(self.priority.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for name in &self.eligible {
            map.serialize_entry(name, &true)?;
        }
        if let Some(priority) = &self.priority {
            map.serialize_entry(PRIORITY_KEY, priority)?;
        }
        map.end()
    }
}

/// Item name -> entry, in item-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LootBoard(BTreeMap<String, LootBoardEntry>);

impl LootBoard {
    pub fn get(&self, item: &str) -> Option<&LootBoardEntry> {
        self.0.get(item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LootBoardEntry)> {
        self.0.iter()
    }

    /// Items `character` can still lot on, in item-name order.
    pub fn for_character(&self, character: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, entry)| entry.eligible.contains(character))
            .map(|(item, _)| item.as_str())
            .collect()
    }
}

/// Build the board from the active roster and all item queues.
///
/// Every known item appears even with no eligible characters. A character
/// whose eligibility cannot be derived, or whose name would collide with a
/// reserved key, fails the whole build rather than silently dropping out of
/// the board.
pub fn build_board(
    characters: &[CharacterLoot],
    queues: &[ItemQueue],
) -> Result<LootBoard, CoreError> {
    let mut board: BTreeMap<String, LootBoardEntry> = LootTables::get()
        .item_universe()
        .into_iter()
        .map(|item| (item, LootBoardEntry::default()))
        .collect();

    for character in characters {
        if character.name.starts_with(RESERVED_NAME_PREFIX) {
            return Err(CoreError::Internal(format!(
                "Character '{}' uses a reserved board key",
                character.name
            )));
        }
        for entry in remaining_eligibility(character)? {
            board
                .entry(entry.item)
                .or_default()
                .eligible
                .insert(character.name.clone());
        }
    }

    for queue in queues {
        board.entry(queue.item_name.clone()).or_default().priority = Some(queue.ordered_names());
    }

    Ok(LootBoard(board))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;

    use super::*;
    use crate::eligibility::{BossWishlist, GearChoices};
    use crate::item_queue::QueueMember;
    use crate::jobs::Job;
    use crate::loot_tables::OmenBoss;

    fn miaw() -> CharacterLoot {
        let mut c = CharacterLoot::new("Miaw");
        c.primary_gear_jobs = vec![Job::Whm];
        c
    }

    fn svedin() -> CharacterLoot {
        let mut c = CharacterLoot::new("Svedin");
        let mut choices = GearChoices::default();
        choices.sandoria.primary = Some(Job::Pld);
        c.gear_choices = Some(choices);
        c
    }

    fn kerian() -> CharacterLoot {
        let mut c = CharacterLoot::new("Kerian");
        c.wishlist = Some(BossWishlist {
            first_choice: Some(OmenBoss::Kin),
            second_choice: None,
        });
        c
    }

    fn eligible(board: &LootBoard, item: &str) -> BTreeSet<String> {
        board.get(item).unwrap().eligible.clone()
    }

    #[test]
    fn empty_roster_lists_every_known_item() {
        let board = build_board(&[], &[]).unwrap();
        assert_eq!(board.len(), LootTables::get().item_universe().len());
        assert!(board.iter().all(|(_, e)| e.eligible.is_empty() && e.priority.is_none()));
    }

    #[test]
    fn primary_job_character_only_on_general_loot() {
        let board = build_board(&[miaw()], &[]).unwrap();
        assert!(eligible(&board, "Ammurapi shield").contains("Miaw"));
        assert!(eligible(&board, "Shamash robe").contains("Miaw"));
        assert!(!eligible(&board, "Footshard: WHM").contains("Miaw"));
    }

    #[test]
    fn zone_choice_character_only_on_zone_items() {
        let board = build_board(&[svedin()], &[]).unwrap();
        assert!(eligible(&board, "Footshard: PLD").contains("Svedin"));
        assert!(eligible(&board, "Voidfoot: PLD").contains("Svedin"));
        assert_eq!(board.for_character("Svedin"), vec!["Footshard: PLD", "Voidfoot: PLD"]);
    }

    #[test]
    fn wishlist_character_on_first_scale_only() {
        let board = build_board(&[kerian()], &[]).unwrap();
        assert!(eligible(&board, "Kin's Scale").contains("Kerian"));
        assert_eq!(board.for_character("Kerian"), vec!["Kin's Scale"]);
    }

    #[test]
    fn obtained_item_excludes_character() {
        let mut c = miaw();
        c.obtained = HashSet::from(["Ammurapi shield".to_string()]);
        let board = build_board(&[c], &[]).unwrap();
        assert!(!eligible(&board, "Ammurapi shield").contains("Miaw"));
        assert!(eligible(&board, "Shamash robe").contains("Miaw"));
    }

    #[test]
    fn queue_attached_independently_of_eligibility() {
        let queue = ItemQueue::new(
            "Ammurapi shield",
            vec![
                QueueMember {
                    character_id: 3,
                    character_name: "Kerian".to_string(),
                    position: 2,
                },
                QueueMember {
                    character_id: 1,
                    character_name: "Miaw".to_string(),
                    position: 1,
                },
            ],
        );
        let board = build_board(&[miaw(), kerian()], &[queue]).unwrap();
        let entry = board.get("Ammurapi shield").unwrap();

        assert_eq!(
            entry.priority.as_deref(),
            Some(&["Miaw".to_string(), "Kerian".to_string()][..])
        );
        assert!(entry.eligible.contains("Miaw"));
        assert!(!entry.eligible.contains("Kerian"));
        assert!(board.get("Shamash robe").unwrap().priority.is_none());
    }

    #[test]
    fn board_build_is_idempotent() {
        let roster = [miaw(), svedin(), kerian()];
        let first = build_board(&roster, &[]).unwrap();
        let second = build_board(&roster, &[]).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn serialized_shape() {
        let queue = ItemQueue::new(
            "Kin's Scale",
            vec![QueueMember {
                character_id: 3,
                character_name: "Kerian".to_string(),
                position: 1,
            }],
        );
        let board = build_board(&[kerian(), miaw()], &[queue]).unwrap();
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(
            json["Kin's Scale"],
            serde_json::json!({ "Kerian": true, "_priority": ["Kerian"] })
        );
        assert_eq!(json["Ammurapi shield"], serde_json::json!({ "Miaw": true }));
        assert_eq!(json["Footshard: WAR"], serde_json::json!({}));
    }

    #[test]
    fn empty_queue_publishes_empty_priority() {
        let board = build_board(&[], &[ItemQueue::new("Regal gem", vec![])]).unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["Regal gem"], serde_json::json!({ "_priority": [] }));
    }

    #[test]
    fn reserved_key_name_fails_the_build() {
        let mut shadow = miaw();
        shadow.name = PRIORITY_KEY.to_string();
        let queue = ItemQueue::new(
            "Ammurapi shield",
            vec![QueueMember {
                character_id: 1,
                character_name: "Miaw".to_string(),
                position: 1,
            }],
        );

        assert_matches!(
            build_board(&[miaw(), shadow], &[queue]),
            Err(CoreError::Internal(msg)) if msg.contains(PRIORITY_KEY)
        );
    }

    #[test]
    fn character_name_rules() {
        assert!(validate_character_name("Miaw").is_ok());
        assert!(validate_character_name("Mi_aw").is_ok());
        assert_matches!(
            validate_character_name(PRIORITY_KEY),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_character_name("_Miaw"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(validate_character_name("  "), Err(CoreError::Validation(_)));
    }
}
