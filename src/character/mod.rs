//! Player character: class, stats, inventory and leveling.

pub mod inventory;
pub mod progression;
pub mod types;

pub use inventory::Inventory;
pub use progression::{gain_xp, next_threshold, LevelUp};
pub use types::*;
