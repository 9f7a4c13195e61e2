//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` DTO for inserts or upserts where the table is written

pub mod alliance;
pub mod boss_wishlist;
pub mod character;
pub mod character_job;
pub mod gear_choice;
pub mod item_queue;
pub mod obtained_item;
pub mod user;
