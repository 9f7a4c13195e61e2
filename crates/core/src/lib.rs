//! Midguardians loot engine.
//!
//! Pure domain logic with no database dependencies: the job and zone rule
//! tables, per-character eligibility derivation, priority-queue reconciliation
//! planning, and the aggregate loot board. Callers load state (see the `db`
//! crate) and pass it in.

pub mod eligibility;
pub mod error;
pub mod item_queue;
pub mod jobs;
pub mod loot_board;
pub mod loot_tables;
pub mod roles;
pub mod types;
