//! Wave queue
//!
//! Units a player sends during Preparation, held until the round snapshot is built.
//! Spawn ticks are assigned at snapshot time, not at enqueue time, so the order units
//! were sent in is irrelevant across players and only matters within a single
//! (player, route) group: the Nth unit sent down a route spawns `N * SPAWN_DELAY_TICKS`
//! after the round starts.

use std::collections::BTreeMap;

use crate::balance::{self, ROUTE_COUNT, SPAWN_DELAY_TICKS};
use crate::error::GameError;
use crate::game::player::PlayerId;
use crate::game::snapshot::SimUnitData;

/// A requested batch: `count` units of `unit_type` down `route`, as sent in one
/// `SendUnits` line item. Expanded into individual `QueuedUnit`s by
/// `GameStateManager::add_units_to_wave`.
#[derive(Clone, Debug)]
pub struct UnitOrder {
    pub unit_type: String,
    pub route: u8,
    pub count: u32,
}

/// One unit a player queued for the next round, not yet assigned a spawn tick.
#[derive(Clone, Debug)]
pub struct QueuedUnit {
    pub player: PlayerId,
    pub unit_type: String,
    pub route: u8,
}

/// Units queued for the upcoming round, across both players.
#[derive(Clone, Debug, Default)]
pub struct WaveQueue {
    units: Vec<QueuedUnit>,
}

impl WaveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one unit, validating its type and route exist.
    pub fn enqueue(&mut self, player: PlayerId, unit_type: &str, route: u8) -> Result<(), GameError> {
        if !balance::unit_stats().contains_key(unit_type) {
            return Err(GameError::UnknownType);
        }
        if route as usize >= ROUTE_COUNT {
            return Err(GameError::InvalidRoute);
        }
        self.units.push(QueuedUnit { player, unit_type: unit_type.to_string(), route });
        Ok(())
    }

    /// Freeze the queue into combat-ready snapshot data, assigning each unit's spawn
    /// tick by its position within its (player, route) group.
    pub fn snapshot_units(&self) -> Vec<SimUnitData> {
        let mut seen: BTreeMap<(PlayerId, u8), u32> = BTreeMap::new();
        self.units
            .iter()
            .map(|q| {
                let slot = seen.entry((q.player, q.route)).or_insert(0);
                let spawn_tick = *slot * SPAWN_DELAY_TICKS;
                *slot += 1;
                SimUnitData { player: q.player, unit_type: q.unit_type.clone(), route: q.route, spawn_tick }
            })
            .collect()
    }

    /// Drop every queued unit, ready for the next round's Preparation phase.
    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn count_for(&self, player: PlayerId) -> usize {
        self.units.iter().filter(|u| u.player == player).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_unit_type_and_bad_route() {
        let mut q = WaveQueue::new();
        assert_eq!(q.enqueue(PlayerId::A, "dragon", 0).unwrap_err(), GameError::UnknownType);
        assert_eq!(q.enqueue(PlayerId::A, "standard", 9).unwrap_err(), GameError::InvalidRoute);
    }

    #[test]
    fn same_route_group_gets_staggered_spawn_ticks() {
        let mut q = WaveQueue::new();
        q.enqueue(PlayerId::A, "standard", 0).unwrap();
        q.enqueue(PlayerId::A, "standard", 0).unwrap();
        q.enqueue(PlayerId::A, "standard", 0).unwrap();
        let snapshot = q.snapshot_units();
        let ticks: Vec<u32> = snapshot.iter().map(|u| u.spawn_tick).collect();
        assert_eq!(ticks, vec![0, SPAWN_DELAY_TICKS, SPAWN_DELAY_TICKS * 2]);
    }

    #[test]
    fn different_routes_and_players_spawn_independently_at_tick_zero() {
        let mut q = WaveQueue::new();
        q.enqueue(PlayerId::A, "standard", 0).unwrap();
        q.enqueue(PlayerId::A, "standard", 1).unwrap();
        q.enqueue(PlayerId::B, "standard", 0).unwrap();
        let snapshot = q.snapshot_units();
        assert!(snapshot.iter().all(|u| u.spawn_tick == 0));
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut q = WaveQueue::new();
        q.enqueue(PlayerId::A, "standard", 0).unwrap();
        q.clear();
        assert_eq!(q.count_for(PlayerId::A), 0);
        assert!(q.snapshot_units().is_empty());
    }
}
