//! Data models
//!
//! Rust structs representing database entities.

mod drink;
mod drink_type;
mod last_volume;

pub use drink::{DrinkEntry, DrinkEntryCreate, DrinkEntryUpdate};
pub use drink_type::{find_quick_pick, quick_picks, DrinkType, HydrationGroup, QuickPick, Strength};
pub use last_volume::LastVolume;
