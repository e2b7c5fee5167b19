//! Combat system: enemy roster, turn state machine and its events.

pub mod enemies;
pub mod logic;
pub mod types;

pub use enemies::spawn_enemy;
pub use logic::Combat;
pub use types::*;
