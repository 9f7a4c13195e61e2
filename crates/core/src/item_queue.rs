//! Per-item priority queues.
//!
//! An administrator curates, for selected items, an ordered list of
//! characters allowed to claim the item ahead of the general eligible pool.
//! The only mutation is a whole-queue rewrite: the editor submits the full
//! desired order and [`plan_reconcile`] computes the row changes needed to get
//! there.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Longest accepted reconcile payload.
pub const MAX_QUEUE_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueMember {
    pub character_id: DbId,
    pub character_name: String,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemQueue {
    pub item_name: String,
    /// Always sorted by `position` ascending.
    pub members: Vec<QueueMember>,
}

impl ItemQueue {
    /// Build a queue, sorting members by position.
    pub fn new(item_name: impl Into<String>, mut members: Vec<QueueMember>) -> Self {
        members.sort_by_key(|m| m.position);
        Self {
            item_name: item_name.into(),
            members,
        }
    }

    /// Member names in claim order.
    pub fn ordered_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.character_name.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The queue for `item_name`, if one exists.
///
/// Library lookup for callers already holding every queue, e.g. a loaded
/// snapshot. The HTTP queue read fetches one queue directly instead.
pub fn queue_for<'a>(queues: &'a [ItemQueue], item_name: &str) -> Option<&'a ItemQueue> {
    queues.iter().find(|q| q.item_name == item_name)
}

/// Whether `character_name` holds any position in `queue`.
pub fn character_has_priority(queue: &ItemQueue, character_name: &str) -> bool {
    queue
        .members
        .iter()
        .any(|m| m.character_name == character_name)
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Row changes that turn the current queue into the desired order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Existing members whose position changes: `(character_id, new_position)`.
    pub updates: Vec<(DbId, i32)>,
    /// New members: `(character_id, position)`.
    pub inserts: Vec<(DbId, i32)>,
    /// Members no longer in the desired list.
    pub removals: Vec<DbId>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.inserts.is_empty() && self.removals.is_empty()
    }
}

/// Validate a submitted list of character names before resolving them.
pub fn validate_desired_names(names: &[String]) -> Result<(), CoreError> {
    if names.len() > MAX_QUEUE_LEN {
        return Err(CoreError::Validation(format!(
            "A queue may hold at most {MAX_QUEUE_LEN} characters"
        )));
    }
    let mut seen = HashSet::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Character name at index {i} must not be empty"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(CoreError::Validation(format!(
                "Character '{name}' appears more than once"
            )));
        }
    }
    Ok(())
}

/// Compute the changes to apply to `current` so it matches `desired`.
///
/// Positions are 1-indexed in `desired` order. Members already at the right
/// position produce no update, so reconciling with the current order yields
/// an empty plan.
pub fn plan_reconcile(current: &[QueueMember], desired: &[DbId]) -> Result<ReconcilePlan, CoreError> {
    let mut seen = HashSet::with_capacity(desired.len());
    if let Some(dup) = desired.iter().find(|id| !seen.insert(**id)) {
        return Err(CoreError::Validation(format!(
            "Character id {dup} appears more than once"
        )));
    }

    let existing: HashMap<DbId, i32> = current
        .iter()
        .map(|m| (m.character_id, m.position))
        .collect();

    let mut plan = ReconcilePlan::default();
    for (index, id) in desired.iter().enumerate() {
        let position = i32::try_from(index + 1)
            .map_err(|_| CoreError::Validation("Queue is too long".to_string()))?;
        match existing.get(id) {
            Some(old) if *old == position => {}
            Some(_) => plan.updates.push((*id, position)),
            None => plan.inserts.push((*id, position)),
        }
    }

    plan.removals = current
        .iter()
        .filter(|m| !seen.contains(&m.character_id))
        .map(|m| m.character_id)
        .collect();

    Ok(plan)
}
