//! Simulation Snapshot
//!
//! `SimulationData` is the immutable bundle that fully determines one round of combat:
//! frozen tower positions plus the queued units for that round, at a fixed tick rate.
//! It is produced by `GameStateManager::get_current_state_snapshot`, run by
//! `game::combat::CombatRunner`, and broadcast verbatim to both clients as the
//! `RoundStart` event payload (see `network::protocol`).

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::player::PlayerId;

/// A tower as it exists at the moment of the snapshot, in pixel space.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimTowerData {
    pub player: PlayerId,
    pub tower_type: String,
    pub position_x_px: f64,
    pub position_y_px: f64,
    pub level: u32,
}

impl SimTowerData {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.position_x_px, self.position_y_px)
    }
}

/// A queued unit as it will be spawned into combat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimUnitData {
    pub player: PlayerId,
    pub unit_type: String,
    pub route: u8,
    pub spawn_tick: u32,
}

/// The full, immutable input to one round of combat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationData {
    pub towers: Vec<SimTowerData>,
    pub units: Vec<SimUnitData>,
    pub tick_rate: u32,
}
