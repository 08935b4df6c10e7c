//! Game Balance
//!
//! Constant tables for towers, units, routes and match timing. Nothing in here is
//! derived at runtime: every value is part of the fixed contract clients build against
//! (see `network::protocol`), so changing a number here changes the wire contract.

use std::collections::BTreeMap;
use crate::core::vec2::Vec2;

/// Tile size in pixels. Tower/unit positions are tile-center pixel coordinates.
pub const TILE_SIZE_PX: f64 = 32.0;

/// Simulation tick rate, in Hz.
pub const TICK_RATE: u32 = 20;

/// Seconds of simulated time per tick.
pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;

/// Preparation phase duration, in seconds.
pub const PREP_SECONDS: u64 = 30;

/// How long the round loop waits for both acks before advancing anyway.
pub const ROUND_ACK_TIMEOUT_SECONDS: u64 = 30;

/// Combat always runs at least this many simulated seconds before it may end.
pub const MIN_SIM_SECONDS: f64 = 5.0;

/// Combat keeps running this many additional quiet seconds after the last tick with
/// any active or not-yet-spawned unit, guaranteeing a settled tail.
pub const TAIL_SECONDS: f64 = 3.0;

/// Starting lives per player.
pub const START_LIVES: u32 = 20;

/// Starting gold per player.
pub const START_GOLD: u32 = 150;

/// Gold earned per enemy kill.
pub const GOLD_PER_KILL: u32 = 5;

/// Ticks between consecutive unit spawns within the same (player, route) group.
pub const SPAWN_DELAY_TICKS: u32 = (0.5 * TICK_RATE as f64) as u32;

/// Number of fixed routes available per player.
pub const ROUTE_COUNT: usize = 5;

/// Map size, in tiles.
pub const MAP_ROWS: usize = 15;
pub const MAP_COLS: usize = 20;

/// Stats for a tower type.
#[derive(Clone, Copy, Debug)]
pub struct TowerStats {
    pub damage: f64,
    pub range_px: f64,
    pub cooldown_ticks: u32,
    pub cost: u32,
}

/// Stats for a unit type.
#[derive(Clone, Copy, Debug)]
pub struct UnitStats {
    pub health: f64,
    pub speed_px_per_s: f64,
    pub cost: u32,
}

/// The tower type table, keyed by type name.
pub fn tower_stats() -> &'static BTreeMap<&'static str, TowerStats> {
    static TABLE: std::sync::OnceLock<BTreeMap<&'static str, TowerStats>> = std::sync::OnceLock::new();
    TABLE.get_or_init(|| {
        let mut m = BTreeMap::new();
        m.insert("standard", TowerStats { damage: 25.0, range_px: 96.0, cooldown_ticks: 10, cost: 20 });
        m.insert("sniper", TowerStats { damage: 60.0, range_px: 180.0, cooldown_ticks: 40, cost: 45 });
        m.insert("splash", TowerStats { damage: 15.0, range_px: 72.0, cooldown_ticks: 16, cost: 35 });
        m
    })
}

/// The unit type table, keyed by type name.
pub fn unit_stats() -> &'static BTreeMap<&'static str, UnitStats> {
    static TABLE: std::sync::OnceLock<BTreeMap<&'static str, UnitStats>> = std::sync::OnceLock::new();
    TABLE.get_or_init(|| {
        let mut m = BTreeMap::new();
        m.insert("standard", UnitStats { health: 10.0, speed_px_per_s: 40.0, cost: 5 });
        m.insert("fast", UnitStats { health: 6.0, speed_px_per_s: 75.0, cost: 7 });
        m.insert("tank", UnitStats { health: 40.0, speed_px_per_s: 22.0, cost: 18 });
        m
    })
}

/// Tile-coordinate waypoints for one of the 5 fixed routes, shared by both players
/// (mirroring, if any, happens at the network boundary — see `network::protocol`).
///
/// Route 0 crosses straight across the middle row; routes 1-4 weave through the grid
/// so towers can't trivially cover all of them with one placement.
pub fn route_tiles(route: u8) -> &'static [(i32, i32)] {
    const R0: &[(i32, i32)] = &[
        (0, 7), (1, 7), (2, 7), (3, 7), (4, 7), (5, 7), (6, 7), (7, 7), (8, 7), (9, 7),
        (10, 7), (11, 7), (12, 7), (13, 7), (14, 7), (15, 7), (16, 7), (17, 7), (18, 7), (19, 7),
    ];
    const R1: &[(i32, i32)] = &[
        (0, 1), (1, 1), (2, 1), (3, 1), (4, 1), (4, 2), (4, 3), (4, 4), (4, 5),
        (5, 5), (6, 5), (7, 5), (8, 5), (9, 5), (10, 5), (11, 5), (12, 5), (13, 5),
        (14, 5), (15, 5), (16, 5), (17, 5), (18, 5), (19, 5),
    ];
    const R2: &[(i32, i32)] = &[
        (0, 13), (1, 13), (2, 13), (3, 13), (4, 13), (4, 12), (4, 11), (4, 10), (4, 9),
        (5, 9), (6, 9), (7, 9), (8, 9), (9, 9), (10, 9), (11, 9), (12, 9), (13, 9),
        (14, 9), (15, 9), (16, 9), (17, 9), (18, 9), (19, 9),
    ];
    const R3: &[(i32, i32)] = &[
        (0, 3), (2, 3), (4, 3), (6, 3), (8, 3), (8, 5), (8, 7), (8, 9), (8, 11),
        (10, 11), (12, 11), (14, 11), (16, 11), (18, 11), (19, 11),
    ];
    const R4: &[(i32, i32)] = &[
        (0, 11), (2, 11), (4, 11), (6, 11), (8, 11), (8, 9), (8, 7), (8, 5), (8, 3),
        (10, 3), (12, 3), (14, 3), (16, 3), (18, 3), (19, 3),
    ];
    match route {
        0 => R0,
        1 => R1,
        2 => R2,
        3 => R3,
        4 => R4,
        _ => &[],
    }
}

/// Convert a route's tile waypoints to pixel-center waypoints, once.
pub fn route_waypoints(route: u8) -> Vec<Vec2> {
    route_tiles(route)
        .iter()
        .map(|&(col, row)| tile_center(row, col))
        .collect()
}

/// Pixel center of a tile.
#[inline]
pub fn tile_center(row: i32, col: i32) -> Vec2 {
    Vec2::new(
        col as f64 * TILE_SIZE_PX + TILE_SIZE_PX / 2.0,
        row as f64 * TILE_SIZE_PX + TILE_SIZE_PX / 2.0,
    )
}
