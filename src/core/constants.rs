// Map
pub const DEFAULT_MAP_WIDTH: usize = 8;
pub const DEFAULT_MAP_HEIGHT: usize = 8;
pub const MIN_MAP_SIDE: usize = 4;
pub const MAX_MAP_SIDE: usize = 32;

// Tile distribution: (share of total cells, minimum count)
pub const COMBAT_TILE_SHARE: (f64, usize) = (0.23, 5);
pub const LOOT_TILE_SHARE: (f64, usize) = (0.15, 3);
pub const NPC_TILE_SHARE: (f64, usize) = (0.12, 2);
pub const BOSS_TILE_SHARE: (f64, usize) = (0.03, 1);
pub const OASIS_TILE_SHARE: (f64, usize) = (0.07, 1);
pub const TRAP_TILE_SHARE: (f64, usize) = (0.05, 1);

// Player
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_XP_TO_NEXT: u32 = 100;
pub const STARTING_SCAN_CHARGES: u32 = 3;
pub const MAX_DODGE_CHANCE: u32 = 95;

// XP curve: next = floor(current * GROWTH) + FLAT
pub const XP_THRESHOLD_GROWTH: f64 = 1.3;
pub const XP_THRESHOLD_FLAT: u32 = 50;
pub const LEVEL_UP_HP_GAIN: (i32, i32) = (8, 15);
pub const LEVEL_UP_ATTACK_GAIN: (i32, i32) = (1, 3);
pub const LEVEL_UP_DODGE_GAIN: u32 = 2;

// Chest tiers
pub const CHEST_COMMON_CUTOFF: f64 = 0.6;
pub const CHEST_RARE_CUTOFF: f64 = 0.9;

// Combat
pub const FLEE_SUCCESS_CHANCE: f64 = 0.5;
pub const NOMAD_DODGE_BONUS: u32 = 20;
pub const NOMAD_DODGE_BONUS_TURNS: u32 = 3;
pub const TECHNICIAN_ATTACK_REDUCTION: i32 = 3;
pub const WARRIOR_SPECIAL_MULTIPLIER: i32 = 2;
pub const SNIPER_SPECIAL_MULTIPLIER: i32 = 3;

// Tile events
pub const TRAP_DAMAGE: (i32, i32) = (10, 25);
pub const TRAP_CHEST_CHANCE: f64 = 0.3;
pub const OASIS_ATTACK_BONUS_CHANCE: f64 = 0.3;
pub const OASIS_ATTACK_BONUS: i32 = 1;

// NPCs
pub const SHAMAN_HP_BLESSING: (i32, i32) = (10, 30);
pub const SHAMAN_ATTACK_BLESSING: i32 = 2;
pub const SHAMAN_DODGE_BLESSING: u32 = 5;
pub const VAGRANT_GIFT_CHANCE: f64 = 0.5;
