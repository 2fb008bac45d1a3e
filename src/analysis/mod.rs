pub mod item_set;
pub mod item_stats;
