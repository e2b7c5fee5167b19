use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of every item that exists in the wastes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    SmallMedkit,
    Rusks,
    MegaMedkit,
    Adrenaline,
    PowerElixir,
    CombatModule,
    FenrirArmor,
    DodgeImplant,
    NanoShield,
    TitaniumVest,
    Scanner,
}

impl ItemId {
    pub const ALL: [ItemId; 11] = [
        ItemId::SmallMedkit,
        ItemId::Rusks,
        ItemId::MegaMedkit,
        ItemId::Adrenaline,
        ItemId::PowerElixir,
        ItemId::CombatModule,
        ItemId::FenrirArmor,
        ItemId::DodgeImplant,
        ItemId::NanoShield,
        ItemId::TitaniumVest,
        ItemId::Scanner,
    ];

    /// Registry entry for this item.
    pub fn item(self) -> &'static Item {
        super::catalog::item(self)
    }

    pub fn name(self) -> &'static str {
        self.item().name
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What using an item does, with its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "magnitude")]
pub enum ItemEffect {
    Heal(i32),
    AttackBoost(i32),
    DodgeBoost(u32),
    HpBoost(i32),
    ScanBoost(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: ItemEffect,
}

/// Rarity bucket of a post-combat chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChestTier {
    Common,
    Rare,
    Epic,
}

impl ChestTier {
    pub fn name(&self) -> &'static str {
        match self {
            ChestTier::Common => "common",
            ChestTier::Rare => "rare",
            ChestTier::Epic => "epic",
        }
    }
}
