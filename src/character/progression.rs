//! XP and leveling.

use super::types::Player;
use crate::core::constants::{
    LEVEL_UP_ATTACK_GAIN, LEVEL_UP_DODGE_GAIN, LEVEL_UP_HP_GAIN, XP_THRESHOLD_FLAT,
    XP_THRESHOLD_GROWTH,
};
use crate::core::dice::Dice;
use serde::Serialize;
use std::fmt;

/// Stat gains granted by a single level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub level: u32,
    pub hp_gain: i32,
    pub attack_gain: i32,
    pub dodge_gain: u32,
}

impl fmt::Display for LevelUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You reach level {}! +{} max HP, +{} damage, +{}% dodge.",
            self.level, self.hp_gain, self.attack_gain, self.dodge_gain
        )
    }
}

/// XP needed for the level after one that needed `current`.
pub fn next_threshold(current: u32) -> u32 {
    (current as f64 * XP_THRESHOLD_GROWTH) as u32 + XP_THRESHOLD_FLAT
}

/// Adds XP and converts the excess into as many level-ups as it covers.
///
/// On return `player.xp < player.xp_to_next`.
pub fn gain_xp(player: &mut Player, amount: u32, dice: &mut impl Dice) -> Vec<LevelUp> {
    player.xp = player.xp.saturating_add(amount);
    let mut level_ups = Vec::new();

    while player.xp >= player.xp_to_next {
        player.xp -= player.xp_to_next;
        player.level += 1;
        player.xp_to_next = next_threshold(player.xp_to_next);

        let hp_gain = dice.roll_range(LEVEL_UP_HP_GAIN.0, LEVEL_UP_HP_GAIN.1);
        player.hp_max += hp_gain;
        player.heal_full();

        let attack_gain = dice.roll_range(LEVEL_UP_ATTACK_GAIN.0, LEVEL_UP_ATTACK_GAIN.1);
        player.raise_attack(attack_gain);

        let dodge_before = player.dodge_chance;
        player.raise_dodge(LEVEL_UP_DODGE_GAIN);

        let level_up = LevelUp {
            level: player.level,
            hp_gain,
            attack_gain,
            dodge_gain: player.dodge_chance - dodge_before,
        };
        tracing::info!(
            level = level_up.level,
            hp_gain,
            attack_gain,
            next_threshold = player.xp_to_next,
            "level up"
        );
        level_ups.push(level_up);
    }

    level_ups
}
