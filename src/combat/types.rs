use crate::character::{LevelUp, PlayerClass};
use crate::core::dice::Dice;
use crate::core::error::GameError;
use crate::items::{ChestTier, EffectReport, ItemId};
use serde::Serialize;
use std::fmt;

/// Stat block of an adversary. Created fresh per encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Enemy {
    pub name: &'static str,
    pub hp: i32,
    pub attack_min: i32,
    pub attack_max: i32,
    pub dodge_chance: u32,
    pub xp_reward: u32,
    pub flavour: &'static str,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn roll_attack(&self, dice: &mut impl Dice) -> i32 {
        dice.roll_range(self.attack_min, self.attack_max)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }

    /// Lowers both attack bounds, keeping `1 <= min <= max`.
    pub fn weaken(&mut self, amount: i32) {
        self.attack_min = (self.attack_min - amount).max(1);
        self.attack_max = (self.attack_max - amount).max(self.attack_min);
    }
}

/// Whether the fight came from a boss tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encounter {
    Regular,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatAction {
    Attack,
    Heal,
    Flee,
    Block,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatState {
    Ongoing,
    PlayerVictory,
    PlayerDefeat,
    PlayerFled,
}

impl CombatState {
    pub fn is_over(&self) -> bool {
        !matches!(self, CombatState::Ongoing)
    }
}

/// Once-per-fight class ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecialAbility {
    /// Warrior: double-damage blow.
    Fury,
    /// Technician: cuts enemy attack for the rest of the fight.
    Virus,
    /// Nomad: temporary dodge bonus.
    Evasion,
    /// Sniper: triple-damage shot.
    Headshot,
}

impl SpecialAbility {
    pub fn for_class(class: PlayerClass) -> Self {
        match class {
            PlayerClass::Warrior => SpecialAbility::Fury,
            PlayerClass::Technician => SpecialAbility::Virus,
            PlayerClass::Nomad => SpecialAbility::Evasion,
            PlayerClass::Sniper => SpecialAbility::Headshot,
        }
    }
}

/// Everything that can happen inside a fight, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum CombatEvent {
    Engaged {
        enemy: &'static str,
        flavour: &'static str,
        hp: i32,
        boss: bool,
    },
    PlayerStruck {
        damage: i32,
        enemy_hp: i32,
    },
    EnemyEvaded,
    Healed {
        item: ItemId,
        report: EffectReport,
    },
    /// The chosen action could not be carried out; the turn still passes.
    ActionFailed {
        reason: GameError,
    },
    BlockRaised,
    SpecialStrike {
        ability: SpecialAbility,
        damage: i32,
        enemy_hp: i32,
    },
    EnemyWeakened {
        attack_min: i32,
        attack_max: i32,
    },
    EvasionGained {
        turns: u32,
    },
    FleeSucceeded,
    FleeFailed,
    EnemyAttack {
        enemy: &'static str,
        damage: i32,
        blocked: bool,
        player_hp: i32,
    },
    PlayerEvaded {
        enemy: &'static str,
    },
    EnemyDefeated {
        enemy: &'static str,
        xp: u32,
    },
    LevelUp(LevelUp),
    ChestFound {
        item: ItemId,
        tier: ChestTier,
    },
    PlayerDied,
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Engaged {
                enemy,
                flavour,
                hp,
                boss,
            } => {
                let tag = if *boss { "Boss" } else { "Enemy" };
                write!(f, "{flavour}\n{tag}: {enemy} ({hp} HP)")
            }
            CombatEvent::PlayerStruck { damage, enemy_hp } => {
                write!(f, "You deal {damage} damage. (enemy HP: {enemy_hp})")
            }
            CombatEvent::EnemyEvaded => write!(f, "The enemy dodged your attack!"),
            CombatEvent::Healed { report, .. } => write!(f, "{report}"),
            CombatEvent::ActionFailed { reason } => write!(f, "{reason}"),
            CombatEvent::BlockRaised => {
                write!(f, "You brace yourself to block the incoming blow.")
            }
            CombatEvent::SpecialStrike {
                ability, damage, ..
            } => match ability {
                SpecialAbility::Headshot => {
                    write!(f, "Critical hit! Your shot deals {damage} damage.")
                }
                _ => write!(f, "You fly into a rage! A mighty blow deals {damage} damage."),
            },
            CombatEvent::EnemyWeakened {
                attack_min,
                attack_max,
            } => write!(
                f,
                "You inject a virus into the enemy's systems. Its damage drops to {attack_min}-{attack_max}."
            ),
            CombatEvent::EvasionGained { turns } => write!(
                f,
                "Your movements quicken; for {turns} turns you are almost untouchable."
            ),
            CombatEvent::FleeSucceeded => write!(f, "You manage to escape!"),
            CombatEvent::FleeFailed => write!(f, "You failed to escape!"),
            CombatEvent::EnemyAttack {
                enemy,
                damage,
                blocked,
                player_hp,
            } => {
                if *blocked {
                    write!(f, "Your block softens the blow: {enemy} deals only {damage} damage. (HP: {player_hp})")
                } else {
                    write!(f, "{enemy} deals {damage} damage to you. (HP: {player_hp})")
                }
            }
            CombatEvent::PlayerEvaded { enemy } => write!(f, "You dodged {enemy}'s attack!"),
            CombatEvent::EnemyDefeated { enemy, xp } => {
                write!(f, "You defeated {enemy}! +{xp} XP.")
            }
            CombatEvent::LevelUp(level_up) => write!(f, "{level_up}"),
            CombatEvent::ChestFound { item, tier } => write!(
                f,
                "After the fight you find {} loot: {} - {}",
                tier.name(),
                item.name(),
                item.item().description
            ),
            CombatEvent::PlayerDied => write!(f, "You have fallen. Your adventure ends here."),
        }
    }
}

/// Events and resulting state of one player action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub events: Vec<CombatEvent>,
    pub state: CombatState,
}
