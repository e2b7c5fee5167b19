//! Turn-based combat between the player and one enemy.
//!
//! Each call to [`Combat::act`] is one exchange: the player's action is
//! resolved, then (unless the enemy died or the player got away) the enemy
//! counterattacks once.

use super::types::{
    CombatAction, CombatEvent, CombatState, Encounter, Enemy, SpecialAbility, TurnReport,
};
use crate::character::{gain_xp, Player};
use crate::core::constants::{
    FLEE_SUCCESS_CHANCE, NOMAD_DODGE_BONUS, NOMAD_DODGE_BONUS_TURNS, SNIPER_SPECIAL_MULTIPLIER,
    TECHNICIAN_ATTACK_REDUCTION, WARRIOR_SPECIAL_MULTIPLIER,
};
use crate::core::dice::Dice;
use crate::core::error::GameError;
use crate::items::{draw_chest, HEALING_ITEMS};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combat {
    enemy: Enemy,
    encounter: Encounter,
    state: CombatState,
    special_used: bool,
    blocking: bool,
    dodge_bonus_turns: u32,
    turns: u32,
}

impl Combat {
    pub fn new(enemy: Enemy, encounter: Encounter) -> Self {
        Self {
            enemy,
            encounter,
            state: CombatState::Ongoing,
            special_used: false,
            blocking: false,
            dodge_bonus_turns: 0,
            turns: 0,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn encounter(&self) -> Encounter {
        self.encounter
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn special_used(&self) -> bool {
        self.special_used
    }

    pub fn dodge_bonus_turns(&self) -> u32 {
        self.dodge_bonus_turns
    }

    /// Exchanges resolved so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Event announcing the fight.
    pub fn opening(&self) -> CombatEvent {
        CombatEvent::Engaged {
            enemy: self.enemy.name,
            flavour: self.enemy.flavour,
            hp: self.enemy.hp,
            boss: self.encounter == Encounter::Boss,
        }
    }

    /// Resolves one player action plus the enemy's answer.
    ///
    /// Fails only when the fight is already over.
    pub fn act(
        &mut self,
        player: &mut Player,
        action: CombatAction,
        dice: &mut impl Dice,
    ) -> Result<TurnReport, GameError> {
        if self.state.is_over() {
            return Err(GameError::invalid_target("The fight is already over."));
        }

        self.turns += 1;
        let mut events = Vec::new();
        let mut enemy_answers = true;

        match action {
            CombatAction::Attack => self.player_attack(player, dice, &mut events),
            CombatAction::Heal => self.player_heal(player, &mut events),
            CombatAction::Flee => {
                if dice.chance(FLEE_SUCCESS_CHANCE) {
                    events.push(CombatEvent::FleeSucceeded);
                    self.state = CombatState::PlayerFled;
                    enemy_answers = false;
                } else {
                    events.push(CombatEvent::FleeFailed);
                }
            }
            CombatAction::Block => {
                self.blocking = true;
                events.push(CombatEvent::BlockRaised);
            }
            CombatAction::Special => self.player_special(player, dice, &mut events),
        }

        tracing::debug!(
            turn = self.turns,
            ?action,
            enemy = self.enemy.name,
            enemy_hp = self.enemy.hp,
            player_hp = player.hp,
            "player action resolved"
        );

        if !self.enemy.is_alive() {
            self.finish_victory(player, dice, &mut events);
        } else if enemy_answers {
            self.enemy_turn(player, dice, &mut events);
            if !player.is_alive() {
                self.state = CombatState::PlayerDefeat;
                events.push(CombatEvent::PlayerDied);
                tracing::info!(enemy = self.enemy.name, turn = self.turns, "player died in combat");
            }
        }

        Ok(TurnReport {
            events,
            state: self.state,
        })
    }

    fn player_attack(&mut self, player: &Player, dice: &mut impl Dice, events: &mut Vec<CombatEvent>) {
        let damage = player.roll_attack(dice);
        if dice.roll_percent() < self.enemy.dodge_chance {
            events.push(CombatEvent::EnemyEvaded);
        } else {
            self.enemy.take_damage(damage);
            events.push(CombatEvent::PlayerStruck {
                damage,
                enemy_hp: self.enemy.hp,
            });
        }
    }

    fn player_heal(&mut self, player: &mut Player, events: &mut Vec<CombatEvent>) {
        let Some(item) = player.inventory.first_of(&HEALING_ITEMS) else {
            events.push(CombatEvent::ActionFailed {
                reason: GameError::out_of_resource("You have nothing to heal yourself with!"),
            });
            return;
        };
        match player.consume(item) {
            Ok(report) => events.push(CombatEvent::Healed { item, report }),
            Err(reason) => events.push(CombatEvent::ActionFailed { reason }),
        }
    }

    fn player_special(&mut self, player: &Player, dice: &mut impl Dice, events: &mut Vec<CombatEvent>) {
        if self.special_used {
            events.push(CombatEvent::ActionFailed {
                reason: GameError::out_of_resource(
                    "You have already used your special ability in this fight!",
                ),
            });
            return;
        }
        self.special_used = true;

        let ability = SpecialAbility::for_class(player.class);
        match ability {
            SpecialAbility::Fury | SpecialAbility::Headshot => {
                let multiplier = if ability == SpecialAbility::Fury {
                    WARRIOR_SPECIAL_MULTIPLIER
                } else {
                    SNIPER_SPECIAL_MULTIPLIER
                };
                let damage = player.roll_attack(dice) * multiplier;
                self.enemy.take_damage(damage);
                events.push(CombatEvent::SpecialStrike {
                    ability,
                    damage,
                    enemy_hp: self.enemy.hp,
                });
            }
            SpecialAbility::Virus => {
                self.enemy.weaken(TECHNICIAN_ATTACK_REDUCTION);
                events.push(CombatEvent::EnemyWeakened {
                    attack_min: self.enemy.attack_min,
                    attack_max: self.enemy.attack_max,
                });
            }
            SpecialAbility::Evasion => {
                self.dodge_bonus_turns = NOMAD_DODGE_BONUS_TURNS;
                events.push(CombatEvent::EvasionGained {
                    turns: NOMAD_DODGE_BONUS_TURNS,
                });
            }
        }
    }

    /// Shared counterattack: dodge roll, damage roll, block halving.
    fn enemy_turn(&mut self, player: &mut Player, dice: &mut impl Dice, events: &mut Vec<CombatEvent>) {
        let bonus = if self.dodge_bonus_turns > 0 {
            NOMAD_DODGE_BONUS
        } else {
            0
        };
        let effective_dodge = player.dodge_chance + bonus;

        if dice.roll_percent() < effective_dodge {
            events.push(CombatEvent::PlayerEvaded {
                enemy: self.enemy.name,
            });
        } else {
            let mut damage = self.enemy.roll_attack(dice);
            let blocked = self.blocking;
            if blocked {
                damage /= 2;
            }
            player.take_damage(damage);
            events.push(CombatEvent::EnemyAttack {
                enemy: self.enemy.name,
                damage,
                blocked,
                player_hp: player.hp,
            });
        }

        // a dodged blow wastes the block
        self.blocking = false;
        self.dodge_bonus_turns = self.dodge_bonus_turns.saturating_sub(1);
    }

    fn finish_victory(&mut self, player: &mut Player, dice: &mut impl Dice, events: &mut Vec<CombatEvent>) {
        self.state = CombatState::PlayerVictory;
        let xp = self.enemy.xp_reward;
        events.push(CombatEvent::EnemyDefeated {
            enemy: self.enemy.name,
            xp,
        });
        for level_up in gain_xp(player, xp, dice) {
            events.push(CombatEvent::LevelUp(level_up));
        }
        let (item, tier) = draw_chest(dice);
        player.add_item(item);
        events.push(CombatEvent::ChestFound { item, tier });
        tracing::debug!(enemy = self.enemy.name, xp, ?item, ?tier, "enemy defeated");
    }
}
