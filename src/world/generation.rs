//! Random desert map generation.

use super::types::{Position, Tile, WorldMap};
use crate::core::constants::{
    BOSS_TILE_SHARE, COMBAT_TILE_SHARE, LOOT_TILE_SHARE, NPC_TILE_SHARE, OASIS_TILE_SHARE,
    TRAP_TILE_SHARE,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of each event tile for a `width` x `height` map.
/// Every remaining cell is empty.
pub fn tile_counts(width: usize, height: usize) -> [(Tile, usize); 6] {
    let total = (width * height) as f64;
    let share = |(fraction, min): (f64, usize)| ((total * fraction) as usize).max(min);
    [
        (Tile::Combat, share(COMBAT_TILE_SHARE)),
        (Tile::Loot, share(LOOT_TILE_SHARE)),
        (Tile::Npc, share(NPC_TILE_SHARE)),
        (Tile::Boss, share(BOSS_TILE_SHARE)),
        (Tile::Oasis, share(OASIS_TILE_SHARE)),
        (Tile::Trap, share(TRAP_TILE_SHARE)),
    ]
}

/// Shuffles the tile mix over the grid and puts the player in the centre.
///
/// The start cell never holds a fight or a trap: if it does, it swaps
/// places with the first safe cell in row-major order.
pub fn generate_map(width: usize, height: usize, rng: &mut impl Rng) -> Option<WorldMap> {
    let total = width * height;
    let mut tiles: Vec<Tile> = tile_counts(width, height)
        .into_iter()
        .flat_map(|(tile, count)| std::iter::repeat(tile).take(count))
        .collect();
    if tiles.len() > total {
        return None;
    }
    tiles.resize(total, Tile::Empty);
    tiles.shuffle(rng);

    let start = Position::new(width / 2, height / 2);
    let start_index = start.y * width + start.x;
    if !tiles[start_index].is_safe() {
        if let Some(safe) = tiles.iter().position(Tile::is_safe) {
            tiles.swap(start_index, safe);
        }
    }

    tracing::debug!(width, height, "map generated");
    WorldMap::from_tiles(width, height, tiles, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_counts_for_default_map() {
        let counts = tile_counts(8, 8);
        assert_eq!(
            counts,
            [
                (Tile::Combat, 14),
                (Tile::Loot, 9),
                (Tile::Npc, 7),
                (Tile::Boss, 1),
                (Tile::Oasis, 4),
                (Tile::Trap, 3),
            ]
        );
    }

    #[test]
    fn test_minimums_apply_on_small_maps() {
        let counts = tile_counts(4, 4);
        let values: Vec<usize> = counts.iter().map(|(_, n)| *n).collect();
        assert_eq!(values, vec![5, 3, 2, 1, 1, 1]);
    }

    #[test]
    fn test_generated_map_matches_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let map = generate_map(8, 8, &mut rng).unwrap();
        for (tile, count) in tile_counts(8, 8) {
            assert_eq!(map.count(tile), count, "{tile:?}");
        }
        assert_eq!(map.count(Tile::Empty), 64 - 38);
    }

    #[test]
    fn test_start_is_centre_safe_and_discovered() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = generate_map(5, 7, &mut rng).unwrap();
            assert_eq!(map.position(), Position::new(2, 3));
            assert!(map.current_tile().is_safe());
            assert!(map.is_discovered(map.position()));
            assert_eq!(map.discovered_count(), 1);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_map(8, 8, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = generate_map(8, 8, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_small_grid_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate_map(2, 2, &mut rng).is_none());
    }
}
