pub mod alliance;
pub mod item_queue;
pub mod loot;
