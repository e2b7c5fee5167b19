//! Fixed enemy stat blocks and the factory that picks one per tile.
//!
//! Stats do not scale with player level.

use super::types::Enemy;
use crate::core::dice::Dice;
use crate::world::Tile;

pub const SAND_WORM: Enemy = Enemy {
    name: "Piaskowy robak",
    hp: 60,
    attack_min: 6,
    attack_max: 12,
    dodge_chance: 5,
    xp_reward: 50,
    flavour: "A huge worm bursts from the sand, its teeth glinting in the sun.",
};

pub const FENRIR_SCOUT: Enemy = Enemy {
    name: "Fenrir Zwiadowca",
    hp: 70,
    attack_min: 8,
    attack_max: 12,
    dodge_chance: 10,
    xp_reward: 60,
    flavour: "A Fenrir scout leaps from behind a dune, firing in bursts.",
};

pub const NOMAD_RAIDER: Enemy = Enemy {
    name: "Nomadzki łupieżca",
    hp: 50,
    attack_min: 5,
    attack_max: 10,
    dodge_chance: 20,
    xp_reward: 45,
    flavour: "A nomad raider tears off their mask with a mocking grin.",
};

pub const HARKONNEN_BERSERKER: Enemy = Enemy {
    name: "Harkonnen Berserker",
    hp: 80,
    attack_min: 9,
    attack_max: 15,
    dodge_chance: 5,
    xp_reward: 70,
    flavour: "A Harkonnen berserker screams something unintelligible and charges.",
};

pub const NANODRONE_SWARM: Enemy = Enemy {
    name: "Rój nanodronów",
    hp: 40,
    attack_min: 4,
    attack_max: 8,
    dodge_chance: 25,
    xp_reward: 40,
    flavour: "A cloud of nanodrones rises, ready to chew you to pieces.",
};

pub const MUTATED_JACKAL: Enemy = Enemy {
    name: "Zmutowany szakal",
    hp: 55,
    attack_min: 7,
    attack_max: 11,
    dodge_chance: 10,
    xp_reward: 50,
    flavour: "A mutated jackal snarls menacingly.",
};

pub const FENRIR_COMMANDER: Enemy = Enemy {
    name: "Fenrir Dowódca",
    hp: 150,
    attack_min: 14,
    attack_max: 20,
    dodge_chance: 20,
    xp_reward: 200,
    flavour: "The Fenrir commander looks down on you with contempt. This will not be an easy fight.",
};

pub const FENRIR_GUARD: Enemy = Enemy {
    name: "Fenrir Strażnik",
    hp: 80,
    attack_min: 10,
    attack_max: 14,
    dodge_chance: 15,
    xp_reward: 80,
    flavour: "A Fenrir guard swings his rifle around, ready to finish you.",
};

/// Roster for ordinary combat tiles.
pub const COMBAT_ROSTER: [Enemy; 5] = [
    SAND_WORM,
    FENRIR_SCOUT,
    NOMAD_RAIDER,
    HARKONNEN_BERSERKER,
    NANODRONE_SWARM,
];

/// Enemy for `tile`. The commander only guards the first boss tile
/// fought; later boss tiles hold a guard.
pub fn spawn_enemy(tile: Tile, boss_fought: bool, dice: &mut impl Dice) -> Enemy {
    match tile {
        Tile::Boss if boss_fought => FENRIR_GUARD,
        Tile::Boss => FENRIR_COMMANDER,
        Tile::Combat => COMBAT_ROSTER[dice.pick(COMBAT_ROSTER.len())],
        _ => MUTATED_JACKAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_boss_tiering() {
        let mut dice = ScriptedDice::new();
        let commander = spawn_enemy(Tile::Boss, false, &mut dice);
        assert_eq!(commander.name, "Fenrir Dowódca");
        assert_eq!(
            (commander.hp, commander.attack_min, commander.attack_max),
            (150, 14, 20)
        );
        assert_eq!((commander.dodge_chance, commander.xp_reward), (20, 200));

        let guard = spawn_enemy(Tile::Boss, true, &mut dice);
        assert_eq!(guard.name, "Fenrir Strażnik");
        assert_eq!((guard.hp, guard.attack_min, guard.attack_max), (80, 10, 14));
        assert_eq!((guard.dodge_chance, guard.xp_reward), (15, 80));
    }

    #[test]
    fn test_combat_tile_uses_roster_pick() {
        let mut dice = ScriptedDice::new().with_picks([0, 4]);
        assert_eq!(spawn_enemy(Tile::Combat, false, &mut dice), SAND_WORM);
        assert_eq!(spawn_enemy(Tile::Combat, true, &mut dice), NANODRONE_SWARM);
    }

    #[test]
    fn test_roster_fully_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(spawn_enemy(Tile::Combat, false, &mut rng).name);
        }
        assert_eq!(seen.len(), COMBAT_ROSTER.len());
    }

    #[test]
    fn test_other_tiles_get_default() {
        let mut dice = ScriptedDice::new();
        assert_eq!(spawn_enemy(Tile::Trap, false, &mut dice), MUTATED_JACKAL);
        assert_eq!(spawn_enemy(Tile::Empty, true, &mut dice), MUTATED_JACKAL);
    }

    #[test]
    fn test_stat_blocks_are_sane() {
        let mut all = COMBAT_ROSTER.to_vec();
        all.extend([MUTATED_JACKAL, FENRIR_COMMANDER, FENRIR_GUARD]);
        for enemy in all {
            assert!(enemy.hp > 0);
            assert!(enemy.attack_min >= 1 && enemy.attack_min <= enemy.attack_max);
            assert!(enemy.dodge_chance < 100);
        }
    }
}
