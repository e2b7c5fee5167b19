//! Process-wide item registry and effect application.
//!
//! The registry is a `static` table built at compile time; every
//! component borrows entries from it instead of constructing items.

use super::types::{Item, ItemEffect, ItemId};
use crate::character::Player;
use crate::core::constants::MAX_DODGE_CHANCE;
use crate::core::input::fold_key;
use serde::Serialize;
use std::fmt;

static CATALOG: [Item; 11] = [
    Item {
        id: ItemId::SmallMedkit,
        name: "Mały medykit",
        description: "A small medical pack that restores some health.",
        effect: ItemEffect::Heal(30),
    },
    Item {
        id: ItemId::Rusks,
        name: "Suchary",
        description: "Stale biscuits. Better than nothing.",
        effect: ItemEffect::Heal(20),
    },
    Item {
        id: ItemId::MegaMedkit,
        name: "Mega medykit",
        description: "A large medical pack that restores a lot of health.",
        effect: ItemEffect::Heal(70),
    },
    Item {
        id: ItemId::Adrenaline,
        name: "Adrenalina",
        description: "An adrenaline shot that sharpens your attack.",
        effect: ItemEffect::AttackBoost(2),
    },
    Item {
        id: ItemId::PowerElixir,
        name: "Eliksir mocy",
        description: "A mysterious fluid that raises your attack.",
        effect: ItemEffect::AttackBoost(3),
    },
    Item {
        id: ItemId::CombatModule,
        name: "Moduł bojowy",
        description: "An advanced module that greatly raises your attack.",
        effect: ItemEffect::AttackBoost(5),
    },
    Item {
        id: ItemId::FenrirArmor,
        name: "Pancerz Fenrira",
        description: "A vest that improves your chance to dodge.",
        effect: ItemEffect::DodgeBoost(5),
    },
    Item {
        id: ItemId::DodgeImplant,
        name: "Implant uniku",
        description: "A cybernetic implant that sharpens your reflexes.",
        effect: ItemEffect::DodgeBoost(10),
    },
    Item {
        id: ItemId::NanoShield,
        name: "Nano tarcza",
        description: "A superconducting shield that raises your maximum HP.",
        effect: ItemEffect::HpBoost(30),
    },
    Item {
        id: ItemId::TitaniumVest,
        name: "Kamizelka tytanowa",
        description: "Titanium armour that raises your maximum HP.",
        effect: ItemEffect::HpBoost(50),
    },
    Item {
        id: ItemId::Scanner,
        name: "Skanner",
        description: "A portable device that adds scan charges.",
        effect: ItemEffect::ScanBoost(2),
    },
];

/// Items the combat Heal action reaches for, in inventory order.
pub const HEALING_ITEMS: [ItemId; 3] = [ItemId::SmallMedkit, ItemId::MegaMedkit, ItemId::Rusks];

pub fn item(id: ItemId) -> &'static Item {
    // CATALOG is laid out in ItemId declaration order
    &CATALOG[id as usize]
}

pub fn all_items() -> &'static [Item] {
    &CATALOG
}

/// Case-insensitive lookup that also accepts spellings without Polish
/// diacritics ("maly medykit").
pub fn find_by_name(name: &str) -> Option<&'static Item> {
    let wanted = fold_key(name);
    CATALOG.iter().find(|item| fold_key(item.name) == wanted)
}

/// Outcome of applying an item's effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "amount")]
pub enum EffectReport {
    Healed(i32),
    AttackRaised(i32),
    /// Actual increase after the dodge cap.
    DodgeRaised(u32),
    MaxHpRaised(i32),
    ScanChargesAdded(u32),
}

impl fmt::Display for EffectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectReport::Healed(hp) => write!(f, "Your wounds close a little. +{hp} HP."),
            EffectReport::AttackRaised(n) => {
                write!(f, "You feel a surge of power. Attack rises by {n}.")
            }
            EffectReport::DodgeRaised(n) => {
                write!(f, "Your senses sharpen. Dodge chance rises by {n}%.")
            }
            EffectReport::MaxHpRaised(n) => {
                write!(f, "Your body hardens. +{n} maximum HP.")
            }
            EffectReport::ScanChargesAdded(n) => {
                write!(f, "Your scanner flickers. You gain {n} scan charge(s).")
            }
        }
    }
}

/// Applies `item` to `player`. Inventory bookkeeping is the caller's job.
pub fn apply(item: &Item, player: &mut Player) -> EffectReport {
    match item.effect {
        ItemEffect::Heal(amount) => EffectReport::Healed(player.heal(amount)),
        ItemEffect::AttackBoost(amount) => {
            player.raise_attack(amount);
            EffectReport::AttackRaised(amount)
        }
        ItemEffect::DodgeBoost(amount) => {
            let before = player.dodge_chance;
            player.raise_dodge(amount);
            debug_assert!(player.dodge_chance <= MAX_DODGE_CHANCE);
            EffectReport::DodgeRaised(player.dodge_chance - before)
        }
        ItemEffect::HpBoost(amount) => {
            player.raise_max_hp(amount);
            EffectReport::MaxHpRaised(amount)
        }
        ItemEffect::ScanBoost(amount) => {
            player.scan_charges += amount;
            EffectReport::ScanChargesAdded(amount)
        }
    }
}
