//! Desert map data structures and exploration events.

use super::npc::{Blessing, Npc};
use crate::combat::Combat;
use crate::items::{ChestTier, ItemId};
use serde::Serialize;
use std::fmt;

/// Event type of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tile {
    Empty,
    Combat,
    Loot,
    Npc,
    Boss,
    Oasis,
    Trap,
}

impl Tile {
    /// What a scan or a hint tells the player about the cell.
    pub fn classification(&self) -> &'static str {
        match self {
            Tile::Empty => "empty sand",
            Tile::Combat => "enemy",
            Tile::Loot => "loot",
            Tile::Npc => "NPC",
            Tile::Boss => "boss",
            Tile::Oasis => "oasis",
            Tile::Trap => "trap",
        }
    }

    /// Tiles the player may start on.
    pub fn is_safe(&self) -> bool {
        matches!(self, Tile::Empty | Tile::Loot | Tile::Npc | Tile::Oasis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// (dx, dy) with y growing southwards.
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// Grid coordinates, `x` across and `y` down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tile grid, discovery state, player position and boss history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldMap {
    width: usize,
    height: usize,
    /// Row-major.
    tiles: Vec<Tile>,
    discovered: Vec<bool>,
    position: Position,
    boss_fought: bool,
}

impl WorldMap {
    /// Builds a map from row-major tiles. Returns `None` when the
    /// dimensions don't match or `start` lies outside the grid.
    pub fn from_tiles(
        width: usize,
        height: usize,
        tiles: Vec<Tile>,
        start: Position,
    ) -> Option<Self> {
        if width == 0 || height == 0 || tiles.len() != width * height {
            return None;
        }
        if start.x >= width || start.y >= height {
            return None;
        }
        let mut map = Self {
            width,
            height,
            discovered: vec![false; tiles.len()],
            tiles,
            position: start,
            boss_fought: false,
        };
        map.discover(start);
        Some(map)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn boss_fought(&self) -> bool {
        self.boss_fought
    }

    pub(crate) fn mark_boss_fought(&mut self) {
        self.boss_fought = true;
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.y * self.width + pos.x)
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    pub fn current_tile(&self) -> Tile {
        self.tile(self.position).unwrap_or(Tile::Empty)
    }

    pub(crate) fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    /// Downgrades the player's cell to empty.
    pub(crate) fn clear_current(&mut self) {
        self.set_tile(self.position, Tile::Empty);
    }

    pub fn is_discovered(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.discovered[i])
    }

    pub(crate) fn discover(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.discovered[i] = true;
        }
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.iter().filter(|d| **d).count()
    }

    /// Cell one step away, if it is on the grid.
    pub fn offset(&self, from: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = from.x.checked_add_signed(dx as isize)?;
        let y = from.y.checked_add_signed(dy as isize)?;
        let pos = Position::new(x, y);
        self.in_bounds(pos).then_some(pos)
    }

    /// In-bounds cells among the 8 surrounding `center`.
    pub fn neighbours(&self, center: Position) -> Vec<Position> {
        let mut cells = Vec::with_capacity(8);
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (Some(x), Some(y)) = (
                    center.x.checked_add_signed(dx),
                    center.y.checked_add_signed(dy),
                ) else {
                    continue;
                };
                let pos = Position::new(x, y);
                if self.in_bounds(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    pub(crate) fn move_to(&mut self, pos: Position) {
        self.position = pos;
        self.discover(pos);
    }

    /// Count of each tile kind still on the map.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Snapshot for the `map` command.
    pub fn view(&self) -> MapView {
        let rows = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == self.position {
                            CellView::Player
                        } else if self.is_discovered(pos) {
                            CellView::Known(self.tile(pos).unwrap_or(Tile::Empty))
                        } else {
                            CellView::Hidden
                        }
                    })
                    .collect()
            })
            .collect();
        MapView {
            position: self.position,
            rows,
        }
    }
}

/// What the player knows about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "cell", content = "tile")]
pub enum CellView {
    Player,
    Known(Tile),
    Hidden,
}

/// Player-facing map, row by row from north to south.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapView {
    pub position: Position,
    pub rows: Vec<Vec<CellView>>,
}

/// Tile classification revealed by a scan or hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sighting {
    pub position: Position,
    pub tile: Tile,
}

/// Everything exploration, movement and NPCs can report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum WorldEvent {
    Surroundings {
        text: &'static str,
    },
    Moved {
        direction: Direction,
        to: Position,
        text: &'static str,
    },
    NothingHere,
    LootFound {
        item: ItemId,
    },
    OasisRest {
        healed: i32,
        attack_bonus: i32,
    },
    TrapSprung {
        damage: i32,
        player_hp: i32,
    },
    TrapChest {
        item: ItemId,
        tier: ChestTier,
    },
    PlayerDied,
    BossAhead,
    NpcMet {
        npc: Npc,
    },
    TraderLeft,
    TradeOffered,
    Traded {
        given: ItemId,
        received: ItemId,
    },
    TradeCancelled,
    Blessed {
        blessing: Blessing,
    },
    GiftReceived {
        item: ItemId,
    },
    StoryTold {
        text: &'static str,
    },
    HintGiven {
        sighting: Option<Sighting>,
    },
    Scanned {
        sightings: Vec<Sighting>,
        charges_left: u32,
    },
}

impl fmt::Display for WorldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldEvent::Surroundings { text } => f.write_str(text),
            WorldEvent::Moved { direction, to, text } => {
                write!(f, "You head {} to {to}. {text}", direction.name())
            }
            WorldEvent::NothingHere => write!(f, "Nothing here but sand and silence."),
            WorldEvent::LootFound { item } => write!(
                f,
                "You found an item: {} - {}",
                item.name(),
                item.item().description
            ),
            WorldEvent::OasisRest {
                healed,
                attack_bonus,
            } => {
                write!(f, "You found an oasis! You rest and recover {healed} HP.")?;
                if *attack_bonus > 0 {
                    write!(f, " The spring water sharpens your senses: +{attack_bonus} damage.")?;
                }
                Ok(())
            }
            WorldEvent::TrapSprung { damage, player_hp } => write!(
                f,
                "You stepped on a trap! You take {damage} damage. (HP: {player_hp})"
            ),
            WorldEvent::TrapChest { item, tier } => write!(
                f,
                "Among the trap's wreckage you find {} loot: {} - {}",
                tier.name(),
                item.name(),
                item.item().description
            ),
            WorldEvent::PlayerDied => write!(f, "You have fallen. The desert claims another."),
            WorldEvent::BossAhead => {
                write!(f, "The air goes still. Something powerful guards this place.")
            }
            WorldEvent::NpcMet { npc } => f.write_str(npc.greeting()),
            WorldEvent::TraderLeft => write!(
                f,
                "You have nothing to trade. The trader shrugs and walks off."
            ),
            WorldEvent::TradeOffered => write!(
                f,
                "\"Give me one of your items and I'll give you something in return.\" Name an item, or cancel."
            ),
            WorldEvent::Traded { given, received } => write!(
                f,
                "You hand over {} and receive {} - {}",
                given.name(),
                received.name(),
                received.item().description
            ),
            WorldEvent::TradeCancelled => write!(f, "You keep your things. The trader moves on."),
            WorldEvent::Blessed { blessing } => write!(f, "{blessing}"),
            WorldEvent::GiftReceived { item } => write!(
                f,
                "\"Take this, you'll need it more than me.\" You receive {} - {}",
                item.name(),
                item.item().description
            ),
            WorldEvent::StoryTold { text } => f.write_str(text),
            WorldEvent::HintGiven { sighting } => match sighting {
                Some(s) => write!(
                    f,
                    "\"North of here, at {}, you'll find: {}.\"",
                    s.position,
                    s.tile.classification()
                ),
                None => write!(f, "\"North of here there is nothing but the edge of the world.\""),
            },
            WorldEvent::Scanned {
                sightings,
                charges_left,
            } => {
                write!(f, "Scanning the area...")?;
                for s in sightings {
                    write!(f, "\n  {}: {}", s.position, s.tile.classification())?;
                }
                write!(f, "\nScan charges left: {charges_left}")
            }
        }
    }
}

/// What the session must do after exploring a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreOutcome {
    /// The cell was resolved on the spot.
    Settled,
    /// A fight begins; the tile is resolved once it ends.
    Fight(Combat),
    /// A trader waits for the player's offer.
    Trade,
    /// The player died on the spot.
    Died,
}

/// Events of one `explore` plus what happens next.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub events: Vec<WorldEvent>,
    pub outcome: ExploreOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> WorldMap {
        use Tile::*;
        WorldMap::from_tiles(
            3,
            3,
            vec![Empty, Combat, Loot, Npc, Empty, Boss, Oasis, Trap, Empty],
            Position::new(1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_from_tiles_rejects_bad_shapes() {
        assert!(WorldMap::from_tiles(2, 2, vec![Tile::Empty; 3], Position::new(0, 0)).is_none());
        assert!(WorldMap::from_tiles(2, 2, vec![Tile::Empty; 4], Position::new(2, 0)).is_none());
    }

    #[test]
    fn test_start_is_discovered() {
        let map = grid();
        assert!(map.is_discovered(Position::new(1, 1)));
        assert_eq!(map.discovered_count(), 1);
        assert_eq!(map.tile(Position::new(2, 1)), Some(Tile::Boss));
        assert_eq!(map.tile(Position::new(3, 1)), None);
    }

    #[test]
    fn test_neighbours_clip_at_edges() {
        let map = grid();
        assert_eq!(map.neighbours(Position::new(1, 1)).len(), 8);
        assert_eq!(
            map.neighbours(Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
        assert_eq!(map.neighbours(Position::new(2, 1)).len(), 5);
    }

    #[test]
    fn test_offset_stays_on_grid() {
        let map = grid();
        let corner = Position::new(0, 0);
        assert_eq!(map.offset(corner, Direction::North), None);
        assert_eq!(map.offset(corner, Direction::West), None);
        assert_eq!(map.offset(corner, Direction::East), Some(Position::new(1, 0)));
        assert_eq!(map.offset(corner, Direction::South), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_view_hides_undiscovered_cells() {
        let mut map = grid();
        map.discover(Position::new(2, 1));
        let view = map.view();
        assert_eq!(view.rows[1][1], CellView::Player);
        assert_eq!(view.rows[1][2], CellView::Known(Tile::Boss));
        assert_eq!(view.rows[0][0], CellView::Hidden);
    }

    #[test]
    fn test_safe_tiles() {
        assert!(Tile::Oasis.is_safe());
        assert!(!Tile::Trap.is_safe());
        assert!(!Tile::Boss.is_safe());
        assert!(!Tile::Combat.is_safe());
    }
}
