//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod alliance_repo;
pub mod boss_wishlist_repo;
pub mod character_job_repo;
pub mod character_repo;
pub mod gear_choice_repo;
pub mod item_queue_repo;
pub mod loot_snapshot_repo;
pub mod obtained_item_repo;
pub mod user_repo;

pub use alliance_repo::AllianceRepo;
pub use boss_wishlist_repo::BossWishlistRepo;
pub use character_job_repo::CharacterJobRepo;
pub use character_repo::CharacterRepo;
pub use gear_choice_repo::GearChoiceRepo;
pub use item_queue_repo::ItemQueueRepo;
pub use loot_snapshot_repo::{LootSnapshot, LootSnapshotRepo};
pub use obtained_item_repo::ObtainedItemRepo;
pub use user_repo::UserRepo;
