//! Game state manager
//!
//! The single mutex-protected façade: `Economy`, both players' `PlacementGrid`s,
//! `TowerPlacementService` and `WaveQueue` all live inside one `Mutex`. Every mutating
//! method validates and applies within one critical section — an error means nothing
//! changed. Nothing in here performs I/O or blocks, so the mutex is always held for a
//! bounded, cheap duration.

use std::sync::Mutex;

use crate::balance::{self, ROUTE_COUNT};
use crate::error::GameError;
use crate::game::economy::{Economy, EconomyView};
use crate::game::grid::PlacementGrid;
use crate::game::placement::{TowerPlacement, TowerPlacementService};
use crate::game::player::PlayerId;
use crate::game::snapshot::SimulationData;
use crate::game::wave::{UnitOrder, WaveQueue};
use crate::game::combat::RoundResult;

/// The round loop's current phase, mirrored into `GameStateManager` so mutation
/// methods can reject requests without crossing into `RoundManager`'s own lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Preparation,
    RoundStart,
    Combat,
    AwaitAck,
    Ended,
}

struct Inner {
    phase: Phase,
    grid_a: PlacementGrid,
    grid_b: PlacementGrid,
    economy: Economy,
    placements: TowerPlacementService,
    wave: WaveQueue,
}

impl Inner {
    fn grid(&self, player: PlayerId) -> &PlacementGrid {
        match player {
            PlayerId::A => &self.grid_a,
            PlayerId::B => &self.grid_b,
        }
    }

    fn grid_mut(&mut self, player: PlayerId) -> &mut PlacementGrid {
        match player {
            PlayerId::A => &mut self.grid_a,
            PlayerId::B => &mut self.grid_b,
        }
    }
}

/// Mutex-guarded authoritative state for one match.
pub struct GameStateManager {
    inner: Mutex<Inner>,
}

impl GameStateManager {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                phase: Phase::Preparation,
                grid_a: PlacementGrid::new(),
                grid_b: PlacementGrid::new(),
                economy: Economy::new(),
                placements: TowerPlacementService::new(),
                wave: WaveQueue::new(),
            }),
        }
    }

    /// Set by `RoundManager` on every phase transition. Never called while
    /// `RoundManager`'s own phase lock is held.
    pub fn set_phase(&self, phase: Phase) {
        self.inner.lock().expect("state mutex poisoned").phase = phase;
    }

    pub fn current_phase(&self) -> Phase {
        self.inner.lock().expect("state mutex poisoned").phase
    }

    /// Validate and place a tower: phase, cost, then cell. Spends gold and occupies
    /// the cell atomically with recording the placement.
    pub fn build_tower(&self, player: PlayerId, tower_type: &str, row: i32, col: i32) -> Result<TowerPlacement, GameError> {
        let mut inner = self.inner.lock().expect("state mutex poisoned");
        if inner.phase != Phase::Preparation {
            return Err(GameError::WrongPhase);
        }
        let cost = balance::tower_stats().get(tower_type).ok_or(GameError::UnknownType)?.cost;
        if !inner.grid(player).is_buildable(row, col) {
            return Err(inner.grid(player).rejection_reason(row, col));
        }
        inner.economy.spend_gold(player, cost)?;
        inner.grid_mut(player).occupy(row, col);
        inner.placements.place(player, tower_type, row, col)?;
        Ok(TowerPlacement { player, tower_type: tower_type.to_string(), row, col })
    }

    /// Validate and queue a batch of units: phase, every type/route, total cost, then
    /// spend and enqueue. No gold is spent if any line item is invalid.
    pub fn add_units_to_wave(&self, player: PlayerId, orders: &[UnitOrder]) -> Result<(), GameError> {
        let mut inner = self.inner.lock().expect("state mutex poisoned");
        if inner.phase != Phase::Preparation {
            return Err(GameError::WrongPhase);
        }
        let mut total_cost: u32 = 0;
        for order in orders {
            let stats = balance::unit_stats().get(order.unit_type.as_str()).ok_or(GameError::UnknownType)?;
            if order.route as usize >= ROUTE_COUNT {
                return Err(GameError::InvalidRoute);
            }
            total_cost = total_cost.saturating_add(stats.cost.saturating_mul(order.count));
        }
        inner.economy.spend_gold(player, total_cost)?;
        for order in orders {
            for _ in 0..order.count {
                inner.wave.enqueue(player, &order.unit_type, order.route)?;
            }
        }
        Ok(())
    }

    /// Freeze current towers and queued units into a combat-ready snapshot.
    pub fn get_current_state_snapshot(&self, tick_rate: u32) -> SimulationData {
        let inner = self.inner.lock().expect("state mutex poisoned");
        SimulationData {
            towers: inner.placements.snapshot_towers(),
            units: inner.wave.snapshot_units(),
            tick_rate,
        }
    }

    /// Apply a finished round's result to the economy.
    pub fn apply_round_result(&self, result: &RoundResult) {
        self.inner.lock().expect("state mutex poisoned").economy.apply_round_result(result);
    }

    /// Clear queued units after their round has been consumed into a snapshot.
    pub fn clear_wave_data(&self) {
        self.inner.lock().expect("state mutex poisoned").wave.clear();
    }

    /// The winner, if either player has reached 0 lives.
    pub fn is_match_over(&self) -> Option<PlayerId> {
        self.inner.lock().expect("state mutex poisoned").economy.winner()
    }

    pub fn economy_view(&self) -> EconomyView {
        self.inner.lock().expect("state mutex poisoned").economy.view()
    }
}

impl Default for GameStateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tower_rejects_outside_preparation() {
        let mgr = GameStateManager::new();
        mgr.set_phase(Phase::Combat);
        let err = mgr.build_tower(PlayerId::A, "standard", 0, 0).unwrap_err();
        assert_eq!(err, GameError::WrongPhase);
    }

    #[test]
    fn build_tower_spends_gold_and_occupies_cell() {
        let mgr = GameStateManager::new();
        let before = mgr.economy_view().gold_a;
        mgr.build_tower(PlayerId::A, "standard", 0, 0).unwrap();
        assert_eq!(mgr.economy_view().gold_a, before - 20);
        let err = mgr.build_tower(PlayerId::A, "standard", 0, 0).unwrap_err();
        assert_eq!(err, GameError::CellOccupied);
    }

    #[test]
    fn build_tower_on_path_tile_is_not_buildable() {
        let mgr = GameStateManager::new();
        let err = mgr.build_tower(PlayerId::A, "standard", 7, 0).unwrap_err();
        assert_eq!(err, GameError::NotBuildable);
    }

    #[test]
    fn failed_build_does_not_spend_gold() {
        let mgr = GameStateManager::new();
        let before = mgr.economy_view().gold_a;
        let _ = mgr.build_tower(PlayerId::A, "standard", 7, 0);
        assert_eq!(mgr.economy_view().gold_a, before);
    }

    #[test]
    fn add_units_to_wave_rejects_insufficient_gold_without_partial_enqueue() {
        let mgr = GameStateManager::new();
        let orders = vec![UnitOrder { unit_type: "tank".to_string(), route: 0, count: 100 }];
        let err = mgr.add_units_to_wave(PlayerId::A, &orders).unwrap_err();
        assert_eq!(err, GameError::InsufficientGold);
        let snapshot = mgr.get_current_state_snapshot(balance::TICK_RATE);
        assert!(snapshot.units.is_empty());
    }

    #[test]
    fn snapshot_reflects_placements_and_wave_then_clear_empties_wave() {
        let mgr = GameStateManager::new();
        mgr.build_tower(PlayerId::A, "standard", 0, 0).unwrap();
        let orders = vec![UnitOrder { unit_type: "standard".to_string(), route: 0, count: 2 }];
        mgr.add_units_to_wave(PlayerId::B, &orders).unwrap();
        let snapshot = mgr.get_current_state_snapshot(balance::TICK_RATE);
        assert_eq!(snapshot.towers.len(), 1);
        assert_eq!(snapshot.units.len(), 2);
        mgr.clear_wave_data();
        let snapshot = mgr.get_current_state_snapshot(balance::TICK_RATE);
        assert_eq!(snapshot.towers.len(), 1, "towers persist across rounds");
        assert!(snapshot.units.is_empty());
    }

    #[test]
    fn is_match_over_reports_winner_after_apply_round_result() {
        let mgr = GameStateManager::new();
        let result = RoundResult { lives_lost_a: balance::START_LIVES, lives_lost_b: 0, gold_earned_a: 0, gold_earned_b: 0 };
        mgr.apply_round_result(&result);
        assert_eq!(mgr.is_match_over(), Some(PlayerId::B));
    }
}
