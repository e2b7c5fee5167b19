//! The desert map: generation, tile events, NPCs and movement.

pub mod generation;
pub mod logic;
pub mod npc;
pub mod types;

pub use generation::{generate_map, tile_counts};
pub use logic::{explore, resolve_encounter, scan, step};
pub use npc::{Blessing, Npc};
pub use types::*;
