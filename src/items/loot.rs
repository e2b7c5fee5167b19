//! Loot tables: tiered chests after combat, and the basic table used by
//! field loot tiles and NPCs.

use super::types::{ChestTier, ItemId};
use crate::core::constants::{CHEST_COMMON_CUTOFF, CHEST_RARE_CUTOFF};
use crate::core::dice::Dice;

pub const COMMON_CHEST: [ItemId; 4] = [
    ItemId::SmallMedkit,
    ItemId::Rusks,
    ItemId::Adrenaline,
    ItemId::Scanner,
];

pub const RARE_CHEST: [ItemId; 4] = [
    ItemId::FenrirArmor,
    ItemId::PowerElixir,
    ItemId::MegaMedkit,
    ItemId::NanoShield,
];

pub const EPIC_CHEST: [ItemId; 4] = [
    ItemId::CombatModule,
    ItemId::TitaniumVest,
    ItemId::DodgeImplant,
    ItemId::Scanner,
];

pub const BASIC_TABLE: [ItemId; 6] = [
    ItemId::SmallMedkit,
    ItemId::Adrenaline,
    ItemId::FenrirArmor,
    ItemId::Rusks,
    ItemId::PowerElixir,
    ItemId::MegaMedkit,
];

impl ChestTier {
    pub fn pool(&self) -> &'static [ItemId] {
        match self {
            ChestTier::Common => &COMMON_CHEST,
            ChestTier::Rare => &RARE_CHEST,
            ChestTier::Epic => &EPIC_CHEST,
        }
    }
}

/// Maps a uniform fraction onto a tier: 60% common, 30% rare, 10% epic.
pub fn tier_for_roll(roll: f64) -> ChestTier {
    if roll < CHEST_COMMON_CUTOFF {
        ChestTier::Common
    } else if roll < CHEST_RARE_CUTOFF {
        ChestTier::Rare
    } else {
        ChestTier::Epic
    }
}

/// Draws a chest: one fraction for the tier, one pick inside its pool.
pub fn draw_chest(dice: &mut impl Dice) -> (ItemId, ChestTier) {
    let tier = tier_for_roll(dice.roll_fraction());
    let pool = tier.pool();
    (pool[dice.pick(pool.len())], tier)
}

pub fn draw_basic(dice: &mut impl Dice) -> ItemId {
    BASIC_TABLE[dice.pick(BASIC_TABLE.len())]
}
