//! Tile events, scanning and movement.

use super::npc::{self, Meeting};
use super::types::{
    Direction, ExploreOutcome, Exploration, Sighting, Tile, WorldEvent, WorldMap,
};
use crate::character::Player;
use crate::combat::{spawn_enemy, Combat, CombatState, Encounter};
use crate::core::constants::{
    OASIS_ATTACK_BONUS, OASIS_ATTACK_BONUS_CHANCE, TRAP_CHEST_CHANCE, TRAP_DAMAGE,
};
use crate::core::dice::Dice;
use crate::core::error::GameError;
use crate::items::{draw_basic, draw_chest};

pub const EXPLORE_TEXTS: [&str; 5] = [
    "You walk through a wrecked caravan, the sand cutting your skin. Then you hear a metallic clank...",
    "You come across the ruins of old machines, relics of a lost technology.",
    "Your boots sink into the sand when something glinting catches your eye.",
    "A quiet whisper of wind carries the smell of ozone... that rarely bodes well.",
    "On the horizon you make out the remains of a gigantic robot.",
];

pub const TRAVEL_TEXTS: [&str; 5] = [
    "Sand crunches under your boots and the wind sings a restless tune.",
    "Someone lived here once. Now there's only the desert ghost and you.",
    "Tracks of some beast cross your path. Better stay alert.",
    "A metallic grinding echoes from afar. Scrap, or maybe a drone.",
    "The sand bites at your skin as if it wants to get under your clothes.",
];

/// Resolves the event on the player's current cell.
///
/// Fights are only started here. The caller runs the [`Combat`] and then
/// hands its final state to [`resolve_encounter`].
pub fn explore(map: &mut WorldMap, player: &mut Player, dice: &mut impl Dice) -> Exploration {
    let tile = map.current_tile();
    let mut events = vec![WorldEvent::Surroundings {
        text: EXPLORE_TEXTS[dice.pick(EXPLORE_TEXTS.len())],
    }];
    tracing::debug!(?tile, position = %map.position(), "exploring tile");

    let outcome = match tile {
        Tile::Empty => {
            events.push(WorldEvent::NothingHere);
            ExploreOutcome::Settled
        }
        Tile::Combat => {
            let enemy = spawn_enemy(tile, map.boss_fought(), dice);
            ExploreOutcome::Fight(Combat::new(enemy, Encounter::Regular))
        }
        Tile::Boss => {
            let enemy = spawn_enemy(tile, map.boss_fought(), dice);
            events.push(WorldEvent::BossAhead);
            tracing::info!(enemy = enemy.name, "boss encounter");
            ExploreOutcome::Fight(Combat::new(enemy, Encounter::Boss))
        }
        Tile::Loot => {
            let item = draw_basic(dice);
            player.add_item(item);
            map.clear_current();
            events.push(WorldEvent::LootFound { item });
            ExploreOutcome::Settled
        }
        Tile::Npc => {
            map.clear_current();
            match npc::meet(map, player, dice) {
                Meeting::Done(npc_events) => {
                    events.extend(npc_events);
                    ExploreOutcome::Settled
                }
                Meeting::TradeOpen(npc_events) => {
                    events.extend(npc_events);
                    ExploreOutcome::Trade
                }
            }
        }
        Tile::Oasis => {
            let healed = player.heal_full();
            let attack_bonus = if dice.chance(OASIS_ATTACK_BONUS_CHANCE) {
                player.raise_attack(OASIS_ATTACK_BONUS);
                OASIS_ATTACK_BONUS
            } else {
                0
            };
            map.clear_current();
            events.push(WorldEvent::OasisRest {
                healed,
                attack_bonus,
            });
            ExploreOutcome::Settled
        }
        Tile::Trap => spring_trap(map, player, dice, &mut events),
    };

    Exploration { events, outcome }
}

fn spring_trap(
    map: &mut WorldMap,
    player: &mut Player,
    dice: &mut impl Dice,
    events: &mut Vec<WorldEvent>,
) -> ExploreOutcome {
    let damage = dice.roll_range(TRAP_DAMAGE.0, TRAP_DAMAGE.1);
    player.take_damage(damage);
    events.push(WorldEvent::TrapSprung {
        damage,
        player_hp: player.hp,
    });

    if !player.is_alive() {
        events.push(WorldEvent::PlayerDied);
        tracing::info!(damage, "player killed by trap");
        return ExploreOutcome::Died;
    }

    if dice.chance(TRAP_CHEST_CHANCE) {
        let (item, tier) = draw_chest(dice);
        player.add_item(item);
        events.push(WorldEvent::TrapChest { item, tier });
    }
    map.clear_current();
    ExploreOutcome::Settled
}

/// Applies the end of a fight to the map. Any survival, fleeing included,
/// clears the tile; a survived boss tile also marks the boss as fought.
pub fn resolve_encounter(map: &mut WorldMap, encounter: Encounter, state: CombatState) {
    match state {
        CombatState::Ongoing | CombatState::PlayerDefeat => {}
        CombatState::PlayerVictory | CombatState::PlayerFled => {
            map.clear_current();
            if encounter == Encounter::Boss {
                map.mark_boss_fought();
            }
            tracing::debug!(?encounter, ?state, position = %map.position(), "encounter resolved");
        }
    }
}

/// Spends a scan charge to reveal what lies in the surrounding cells.
pub fn scan(map: &mut WorldMap, player: &mut Player) -> Result<WorldEvent, GameError> {
    if player.scan_charges == 0 {
        return Err(GameError::out_of_resource("You have no scan charges left."));
    }
    player.scan_charges -= 1;

    let sightings = map
        .neighbours(map.position())
        .into_iter()
        .filter_map(|position| {
            let tile = map.tile(position)?;
            Some(Sighting { position, tile })
        })
        .collect::<Vec<_>>();
    for sighting in &sightings {
        map.discover(sighting.position);
    }

    Ok(WorldEvent::Scanned {
        sightings,
        charges_left: player.scan_charges,
    })
}

/// Moves one cell. Leaving the grid is rejected without any change.
pub fn step(
    map: &mut WorldMap,
    direction: Direction,
    dice: &mut impl Dice,
) -> Result<WorldEvent, GameError> {
    let to = map.offset(map.position(), direction).ok_or_else(|| {
        GameError::invalid_target("You can't go any further: a chasm, or the edge of the map.")
    })?;
    map.move_to(to);
    Ok(WorldEvent::Moved {
        direction,
        to,
        text: TRAVEL_TEXTS[dice.pick(TRAVEL_TEXTS.len())],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::PlayerClass;
    use crate::core::dice::ScriptedDice;
    use crate::items::ItemId;
    use crate::world::Position;

    /// 3x3 map with `tile` under the player in the centre.
    fn standing_on(tile: Tile) -> WorldMap {
        let mut tiles = vec![Tile::Empty; 9];
        tiles[4] = tile;
        WorldMap::from_tiles(3, 3, tiles, Position::new(1, 1)).unwrap()
    }

    #[test]
    fn test_empty_tile_is_flavour_only() {
        let mut map = standing_on(Tile::Empty);
        let mut player = Player::new(PlayerClass::Warrior);
        let result = explore(&mut map, &mut player, &mut ScriptedDice::new());
        assert_eq!(result.outcome, ExploreOutcome::Settled);
        assert_eq!(
            result.events,
            vec![
                WorldEvent::Surroundings {
                    text: EXPLORE_TEXTS[0]
                },
                WorldEvent::NothingHere
            ]
        );
        assert_eq!(player, Player::new(PlayerClass::Warrior));
    }

    #[test]
    fn test_loot_tile_gives_basic_item_and_clears() {
        let mut map = standing_on(Tile::Loot);
        let mut player = Player::new(PlayerClass::Warrior);
        let mut dice = ScriptedDice::new().with_picks([0, 5]);
        explore(&mut map, &mut player, &mut dice);
        assert_eq!(player.inventory.count(ItemId::MegaMedkit), 1);
        assert_eq!(map.current_tile(), Tile::Empty);
    }

    #[test]
    fn test_combat_tile_starts_fight_without_clearing() {
        let mut map = standing_on(Tile::Combat);
        let mut player = Player::new(PlayerClass::Warrior);
        let result = explore(&mut map, &mut player, &mut ScriptedDice::new());
        let ExploreOutcome::Fight(combat) = result.outcome else {
            panic!("expected a fight");
        };
        assert_eq!(combat.encounter(), Encounter::Regular);
        assert_eq!(combat.enemy().name, "Piaskowy robak");
        assert_eq!(map.current_tile(), Tile::Combat);
    }

    #[test]
    fn test_boss_tiering_follows_flag() {
        let mut map = standing_on(Tile::Boss);
        let mut player = Player::new(PlayerClass::Warrior);
        let result = explore(&mut map, &mut player, &mut ScriptedDice::new());
        let ExploreOutcome::Fight(combat) = result.outcome else {
            panic!("expected a fight");
        };
        assert_eq!(combat.enemy().name, "Fenrir Dowódca");

        resolve_encounter(&mut map, Encounter::Boss, CombatState::PlayerVictory);
        assert!(map.boss_fought());
        assert_eq!(map.current_tile(), Tile::Empty);

        map.set_tile(map.position(), Tile::Boss);
        let result = explore(&mut map, &mut player, &mut ScriptedDice::new());
        let ExploreOutcome::Fight(combat) = result.outcome else {
            panic!("expected a fight");
        };
        assert_eq!(combat.enemy().name, "Fenrir Strażnik");
    }

    #[test]
    fn test_defeat_leaves_tile_in_place() {
        let mut map = standing_on(Tile::Boss);
        resolve_encounter(&mut map, Encounter::Boss, CombatState::PlayerDefeat);
        assert_eq!(map.current_tile(), Tile::Boss);
        assert!(!map.boss_fought());
    }

    #[test]
    fn test_fleeing_boss_counts_as_survival() {
        let mut map = standing_on(Tile::Boss);
        resolve_encounter(&mut map, Encounter::Boss, CombatState::PlayerFled);
        assert_eq!(map.current_tile(), Tile::Empty);
        assert!(map.boss_fought());
    }

    #[test]
    fn test_oasis_heals_and_may_sharpen() {
        let mut map = standing_on(Tile::Oasis);
        let mut player = Player::new(PlayerClass::Nomad);
        player.hp = 10;
        let mut dice = ScriptedDice::new().with_fractions([0.1]);
        let result = explore(&mut map, &mut player, &mut dice);
        assert_eq!(player.hp, 100);
        assert_eq!((player.attack_min, player.attack_max), (8, 13));
        assert_eq!(
            result.events[1],
            WorldEvent::OasisRest {
                healed: 90,
                attack_bonus: 1
            }
        );
        assert_eq!(map.current_tile(), Tile::Empty);
    }

    #[test]
    fn test_oasis_without_bonus() {
        let mut map = standing_on(Tile::Oasis);
        let mut player = Player::new(PlayerClass::Nomad);
        explore(&mut map, &mut player, &mut ScriptedDice::new());
        assert_eq!((player.attack_min, player.attack_max), (7, 12));
    }

    #[test]
    fn test_lethal_trap_stops_immediately() {
        let mut map = standing_on(Tile::Trap);
        let mut player = Player::new(PlayerClass::Warrior);
        player.hp = 5;
        let mut dice = ScriptedDice::new().with_ranges([25]).with_fractions([0.0]);
        let result = explore(&mut map, &mut player, &mut dice);
        assert_eq!(result.outcome, ExploreOutcome::Died);
        assert_eq!(player.hp, -20);
        assert_eq!(result.events.last(), Some(&WorldEvent::PlayerDied));
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, WorldEvent::TrapChest { .. })));
        assert_eq!(map.current_tile(), Tile::Trap);
        assert_eq!(player.inventory.len(), 1);
    }

    #[test]
    fn test_survived_trap_with_consolation_chest() {
        let mut map = standing_on(Tile::Trap);
        let mut player = Player::new(PlayerClass::Warrior);
        let mut dice = ScriptedDice::new()
            .with_ranges([10])
            .with_fractions([0.2, 0.7])
            .with_picks([0, 3]);
        let result = explore(&mut map, &mut player, &mut dice);
        assert_eq!(player.hp, 110);
        assert_eq!(
            result.events.last(),
            Some(&WorldEvent::TrapChest {
                item: ItemId::NanoShield,
                tier: crate::items::ChestTier::Rare
            })
        );
        assert_eq!(map.current_tile(), Tile::Empty);
    }

    #[test]
    fn test_survived_trap_without_chest() {
        let mut map = standing_on(Tile::Trap);
        let mut player = Player::new(PlayerClass::Warrior);
        let inventory = player.inventory.clone();
        let mut dice = ScriptedDice::new().with_ranges([12]).with_fractions([0.3]);
        let result = explore(&mut map, &mut player, &mut dice);
        assert_eq!(result.outcome, ExploreOutcome::Settled);
        assert_eq!(player.hp, 108);
        assert_eq!(
            result.events.last(),
            Some(&WorldEvent::TrapSprung {
                damage: 12,
                player_hp: 108
            })
        );
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, WorldEvent::TrapChest { .. })));
        assert_eq!(player.inventory, inventory);
        assert_eq!(map.current_tile(), Tile::Empty);
    }

    #[test]
    fn test_npc_tile_is_consumed() {
        let mut map = standing_on(Tile::Npc);
        let mut player = Player::new(PlayerClass::Warrior);
        let mut dice = ScriptedDice::new().with_picks([0, 1, 1]);
        let result = explore(&mut map, &mut player, &mut dice);
        assert_eq!(result.outcome, ExploreOutcome::Settled);
        assert_eq!(map.current_tile(), Tile::Empty);
        assert_eq!(player.attack_min, 10);
    }

    #[test]
    fn test_scan_in_corner_reveals_three() {
        let mut map = WorldMap::from_tiles(3, 3, vec![Tile::Loot; 9], Position::new(0, 0)).unwrap();
        let mut player = Player::new(PlayerClass::Technician);
        let event = scan(&mut map, &mut player).unwrap();
        let WorldEvent::Scanned {
            sightings,
            charges_left,
        } = event
        else {
            panic!("expected a scan");
        };
        assert_eq!(sightings.len(), 3);
        assert_eq!(charges_left, 2);
        assert_eq!(map.discovered_count(), 4);
    }

    #[test]
    fn test_scan_without_charges() {
        let mut map = standing_on(Tile::Empty);
        let mut player = Player::new(PlayerClass::Technician).with_scan_charges(0);
        let err = scan(&mut map, &mut player).unwrap_err();
        assert!(matches!(err, GameError::OutOfResource(_)));
        assert_eq!(map.discovered_count(), 1);
    }

    #[test]
    fn test_step_moves_and_discovers() {
        let mut map = standing_on(Tile::Empty);
        let event = step(&mut map, Direction::East, &mut ScriptedDice::new()).unwrap();
        assert_eq!(map.position(), Position::new(2, 1));
        assert!(map.is_discovered(Position::new(2, 1)));
        assert!(matches!(event, WorldEvent::Moved { direction: Direction::East, .. }));
    }

    #[test]
    fn test_step_off_grid_is_rejected() {
        let mut map = standing_on(Tile::Empty);
        step(&mut map, Direction::North, &mut ScriptedDice::new()).unwrap();
        let before = map.clone();
        let err = step(&mut map, Direction::North, &mut ScriptedDice::new()).unwrap_err();
        assert!(matches!(err, GameError::InvalidTarget(_)));
        assert_eq!(map, before);
    }
}
