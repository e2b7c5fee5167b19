use super::inventory::Inventory;
use crate::core::constants::{
    MAX_DODGE_CHANCE, STARTING_LEVEL, STARTING_SCAN_CHARGES, STARTING_XP_TO_NEXT,
};
use crate::core::dice::Dice;
use crate::core::error::GameError;
use crate::core::input::fold_key;
use crate::items::{self, EffectReport, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Warrior,
    Technician,
    Nomad,
    Sniper,
}

/// Base stats a class starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassStats {
    pub hp: i32,
    pub attack_min: i32,
    pub attack_max: i32,
    pub dodge_chance: u32,
    pub starting_item: (ItemId, u32),
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 4] = [
        PlayerClass::Warrior,
        PlayerClass::Technician,
        PlayerClass::Nomad,
        PlayerClass::Sniper,
    ];

    /// Resolves a typed class name or alias, in Polish or English.
    pub fn from_alias(input: &str) -> Option<Self> {
        match fold_key(input).as_str() {
            "wojownik" | "woj" | "warrior" => Some(PlayerClass::Warrior),
            "technik" | "tech" | "technician" => Some(PlayerClass::Technician),
            "nomada" | "nomad" => Some(PlayerClass::Nomad),
            "snajper" | "sniper" | "strzelec" => Some(PlayerClass::Sniper),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Warrior => "Warrior",
            PlayerClass::Technician => "Technician",
            PlayerClass::Nomad => "Nomad",
            PlayerClass::Sniper => "Sniper",
        }
    }

    pub fn base_stats(&self) -> ClassStats {
        match self {
            PlayerClass::Warrior => ClassStats {
                hp: 120,
                attack_min: 8,
                attack_max: 14,
                dodge_chance: 10,
                starting_item: (ItemId::SmallMedkit, 1),
            },
            PlayerClass::Technician => ClassStats {
                hp: 90,
                attack_min: 6,
                attack_max: 10,
                dodge_chance: 20,
                starting_item: (ItemId::Adrenaline, 1),
            },
            PlayerClass::Nomad => ClassStats {
                hp: 100,
                attack_min: 7,
                attack_max: 12,
                dodge_chance: 15,
                starting_item: (ItemId::Rusks, 2),
            },
            PlayerClass::Sniper => ClassStats {
                hp: 80,
                attack_min: 12,
                attack_max: 20,
                dodge_chance: 15,
                starting_item: (ItemId::Scanner, 1),
            },
        }
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The survivor. Lives for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub class: PlayerClass,
    /// Can go to zero or below; the player is dead then.
    pub hp: i32,
    pub hp_max: i32,
    pub attack_min: i32,
    pub attack_max: i32,
    pub dodge_chance: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub scan_charges: u32,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(class: PlayerClass) -> Self {
        let stats = class.base_stats();
        let mut inventory = Inventory::new();
        inventory.add(stats.starting_item.0, stats.starting_item.1);
        Self {
            class,
            hp: stats.hp,
            hp_max: stats.hp,
            attack_min: stats.attack_min,
            attack_max: stats.attack_max,
            dodge_chance: stats.dodge_chance,
            level: STARTING_LEVEL,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            scan_charges: STARTING_SCAN_CHARGES,
            inventory,
        }
    }

    pub fn with_scan_charges(mut self, charges: u32) -> Self {
        self.scan_charges = charges;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn roll_attack(&self, dice: &mut impl Dice) -> i32 {
        dice.roll_range(self.attack_min, self.attack_max)
    }

    /// Heals up to `amount`, never past max. Returns HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.min(self.hp_max - self.hp).max(0);
        self.hp += healed;
        healed
    }

    /// Returns HP restored.
    pub fn heal_full(&mut self) -> i32 {
        self.heal(self.hp_max - self.hp)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount.max(0);
    }

    pub fn raise_attack(&mut self, amount: i32) {
        self.attack_min += amount;
        self.attack_max += amount;
    }

    pub fn raise_dodge(&mut self, amount: u32) {
        self.dodge_chance = (self.dodge_chance + amount).min(MAX_DODGE_CHANCE);
    }

    /// Raises max HP and current HP together.
    pub fn raise_max_hp(&mut self, amount: i32) {
        self.hp_max += amount;
        self.hp += amount;
    }

    pub fn add_item(&mut self, id: ItemId) {
        self.inventory.add(id, 1);
    }

    /// Applies one unit of a held item and consumes it.
    pub fn consume(&mut self, id: ItemId) -> Result<EffectReport, GameError> {
        if !self.inventory.remove_one(id) {
            return Err(GameError::invalid_target("You don't have that item."));
        }
        Ok(items::apply(id.item(), self))
    }

    /// `use <name>` from the exploration prompt.
    pub fn use_item(&mut self, name: &str) -> Result<(ItemId, EffectReport), GameError> {
        let id = self
            .inventory
            .find_by_name(name)
            .ok_or_else(|| GameError::invalid_target("You don't have that item."))?;
        let report = self.consume(id)?;
        Ok((id, report))
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            class: self.class,
            level: self.level,
            xp: self.xp,
            xp_to_next: self.xp_to_next,
            hp: self.hp,
            hp_max: self.hp_max,
            attack_min: self.attack_min,
            attack_max: self.attack_max,
            dodge_chance: self.dodge_chance,
            scan_charges: self.scan_charges,
        }
    }
}

/// Snapshot for the `status` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub class: PlayerClass,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub hp: i32,
    pub hp_max: i32,
    pub attack_min: i32,
    pub attack_max: i32,
    pub dodge_chance: u32,
    pub scan_charges: u32,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class: {}", self.class)?;
        writeln!(f, "Level: {}", self.level)?;
        writeln!(f, "XP: {}/{}", self.xp, self.xp_to_next)?;
        writeln!(f, "HP: {}/{}", self.hp, self.hp_max)?;
        writeln!(f, "Attack: {}-{}", self.attack_min, self.attack_max)?;
        writeln!(f, "Dodge: {}%", self.dodge_chance)?;
        write!(f, "Scan charges: {}", self.scan_charges)
    }
}
