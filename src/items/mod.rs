//! Item system: registry, effects and loot tables.

pub mod catalog;
pub mod loot;
pub mod types;

pub use catalog::{apply, find_by_name, EffectReport, HEALING_ITEMS};
pub use loot::{draw_basic, draw_chest};
pub use types::*;
