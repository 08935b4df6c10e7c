//! Property tests for the invariants in spec.md §8.
//!
//! Each test exercises the real public types directly (not mocks) across randomized
//! input sequences generated by `proptest`, per SPEC_FULL.md §8's test-tooling section.

use proptest::prelude::*;

use roundhold::balance::{self, MAP_COLS, MAP_ROWS, SPAWN_DELAY_TICKS, START_LIVES};
use roundhold::game::combat::{CombatRunner, RoundResult};
use roundhold::game::economy::Economy;
use roundhold::game::grid::PlacementGrid;
use roundhold::game::placement::TowerPlacementService;
use roundhold::game::snapshot::{SimTowerData, SimUnitData, SimulationData};
use roundhold::game::wave::WaveQueue;
use roundhold::PlayerId;

fn player_strategy() -> impl Strategy<Value = PlayerId> {
    prop_oneof![Just(PlayerId::A), Just(PlayerId::B)]
}

fn tower_type_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("standard"), Just("sniper"), Just("splash")]
}

fn unit_type_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("standard"), Just("fast"), Just("tank")]
}

/// §8 invariant 1: gold and lives stay within `[0, START_LIVES]` / `[0, ∞)` across any
/// sequence of economy operations, including rejected spends and applied round results.
#[derive(Clone, Debug)]
enum EconomyOp {
    Spend(PlayerId, u32),
    AddGold(PlayerId, u32),
    LoseLives(PlayerId, u32),
    ApplyRound(RoundResult),
}

fn economy_op_strategy() -> impl Strategy<Value = EconomyOp> {
    prop_oneof![
        (player_strategy(), 0u32..500).prop_map(|(p, n)| EconomyOp::Spend(p, n)),
        (player_strategy(), 0u32..500).prop_map(|(p, n)| EconomyOp::AddGold(p, n)),
        (player_strategy(), 0u32..50).prop_map(|(p, n)| EconomyOp::LoseLives(p, n)),
        (0u32..50, 0u32..50, 0u32..500, 0u32..500).prop_map(|(la, lb, ga, gb)| {
            EconomyOp::ApplyRound(RoundResult {
                lives_lost_a: la,
                lives_lost_b: lb,
                gold_earned_a: ga,
                gold_earned_b: gb,
            })
        }),
    ]
}

proptest! {
    #[test]
    fn gold_and_lives_stay_in_bounds(ops in prop::collection::vec(economy_op_strategy(), 0..200)) {
        let mut economy = Economy::new();
        for op in ops {
            match op {
                EconomyOp::Spend(p, n) => {
                    let before = economy.gold(p);
                    match economy.spend_gold(p, n) {
                        Ok(()) => prop_assert_eq!(economy.gold(p), before - n),
                        Err(_) => prop_assert_eq!(economy.gold(p), before, "a rejected spend must not change gold"),
                    }
                }
                EconomyOp::AddGold(p, n) => economy.add_gold(p, n),
                EconomyOp::LoseLives(p, n) => economy.lose_lives(p, n),
                EconomyOp::ApplyRound(result) => economy.apply_round_result(&result),
            }
            for p in [PlayerId::A, PlayerId::B] {
                prop_assert!(economy.lives(p) <= START_LIVES);
                // economy.gold/lives are u32: the type itself rules out negative values,
                // so the non-negativity half of invariant 1 is checked by construction.
            }
        }
    }
}

/// §8 invariant 2 / §8.2: two independent runs of `CombatRunner::run` on the same
/// `SimulationData` must produce a byte-equal `RoundResult`.
fn simulation_data_strategy() -> impl Strategy<Value = SimulationData> {
    let tower_strategy = (player_strategy(), tower_type_strategy(), 0i32..15, 0i32..20).prop_map(
        |(player, tower_type, row, col)| {
            let center = balance::tile_center(row, col);
            SimTowerData {
                player,
                tower_type: tower_type.to_string(),
                position_x_px: center.x,
                position_y_px: center.y,
                level: 1,
            }
        },
    );
    let unit_strategy = (player_strategy(), unit_type_strategy(), 0u8..5, 0u32..120).prop_map(
        |(player, unit_type, route, spawn_tick)| SimUnitData {
            player,
            unit_type: unit_type.to_string(),
            route,
            spawn_tick,
        },
    );
    (
        prop::collection::vec(tower_strategy, 0..6),
        prop::collection::vec(unit_strategy, 0..8),
    )
        .prop_map(|(towers, units)| SimulationData { towers, units, tick_rate: balance::TICK_RATE })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn combat_is_deterministic(data in simulation_data_strategy()) {
        let first = CombatRunner::run(&data);
        let second = CombatRunner::run(&data);
        prop_assert_eq!(first, second);
    }
}

// §8 invariant 3: the `PlacementGrid`'s occupied set always equals the set of
// `(row, col)` recorded by `TowerPlacementService`, for any sequence of placement
// attempts (including attempts on paths, out-of-bounds cells, and duplicates).
proptest! {
    #[test]
    fn grid_occupied_set_matches_placements(
        attempts in prop::collection::vec((player_strategy(), tower_type_strategy(), 0i32..(MAP_ROWS as i32), 0i32..(MAP_COLS as i32)), 0..100)
    ) {
        let mut grid_a = PlacementGrid::new();
        let mut grid_b = PlacementGrid::new();
        let mut placements = TowerPlacementService::new();

        for (player, tower_type, row, col) in attempts {
            let grid = match player {
                PlayerId::A => &mut grid_a,
                PlayerId::B => &mut grid_b,
            };
            if grid.is_buildable(row, col) {
                grid.occupy(row, col);
                placements.place(player, tower_type, row, col).unwrap();
            }
        }

        let snapshot = placements.snapshot_towers();
        for (grid, player) in [(&grid_a, PlayerId::A), (&grid_b, PlayerId::B)] {
            for row in 0..(MAP_ROWS as i32) {
                for col in 0..(MAP_COLS as i32) {
                    if grid.is_path(row, col) {
                        continue;
                    }
                    let occupied = !grid.is_buildable(row, col);
                    let has_placement = snapshot
                        .iter()
                        .any(|t| t.player == player && t.position() == balance::tile_center(row, col));
                    prop_assert_eq!(occupied, has_placement, "grid occupancy must match a recorded placement at ({}, {})", row, col);
                }
            }
        }
    }
}

// §8 invariant 4: for any `(player, route)` group in enqueue order, spawn ticks are
// strictly increasing with step `SPAWN_DELAY_TICKS`.
proptest! {
    #[test]
    fn spawn_ticks_strictly_increase_per_group(
        orders in prop::collection::vec((player_strategy(), unit_type_strategy(), 0u8..5), 0..150)
    ) {
        let mut queue = WaveQueue::new();
        for (player, unit_type, route) in &orders {
            queue.enqueue(*player, unit_type, *route).unwrap();
        }
        let snapshot = queue.snapshot_units();

        use std::collections::BTreeMap;
        let mut last_tick_by_group: BTreeMap<(PlayerId, u8), u32> = BTreeMap::new();
        for unit in &snapshot {
            let key = (unit.player, unit.route);
            match last_tick_by_group.get(&key) {
                None => prop_assert_eq!(unit.spawn_tick, 0),
                Some(&prev) => prop_assert_eq!(unit.spawn_tick, prev + SPAWN_DELAY_TICKS),
            }
            last_tick_by_group.insert(key, unit.spawn_tick);
        }
    }
}
