//! Tower placement
//!
//! Tracks each player's placed towers for the current match. Placement itself
//! (ownership, cost, phase, grid) is validated by `GameStateManager::build_tower`;
//! this type just holds the accepted result and knows how to freeze it into a
//! `SimTowerData` snapshot for combat.

use crate::balance;
use crate::error::GameError;
use crate::game::player::PlayerId;
use crate::game::snapshot::SimTowerData;

/// One accepted tower placement.
#[derive(Clone, Debug)]
pub struct TowerPlacement {
    pub player: PlayerId,
    pub tower_type: String,
    pub row: i32,
    pub col: i32,
}

impl TowerPlacement {
    fn to_snapshot(&self) -> SimTowerData {
        let center = balance::tile_center(self.row, self.col);
        SimTowerData {
            player: self.player,
            tower_type: self.tower_type.clone(),
            position_x_px: center.x,
            position_y_px: center.y,
            level: 1,
        }
    }
}

/// All towers placed so far in the match, across both players. Towers accumulate
/// round over round; nothing is ever removed.
#[derive(Clone, Debug, Default)]
pub struct TowerPlacementService {
    placements: Vec<TowerPlacement>,
}

impl TowerPlacementService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-validated placement.
    pub fn place(&mut self, player: PlayerId, tower_type: &str, row: i32, col: i32) -> Result<(), GameError> {
        if !balance::tower_stats().contains_key(tower_type) {
            return Err(GameError::UnknownType);
        }
        self.placements.push(TowerPlacement { player, tower_type: tower_type.to_string(), row, col });
        Ok(())
    }

    /// Freeze every placement to date into combat-ready snapshot data.
    pub fn snapshot_towers(&self) -> Vec<SimTowerData> {
        self.placements.iter().map(TowerPlacement::to_snapshot).collect()
    }

    pub fn count_for(&self, player: PlayerId) -> usize {
        self.placements.iter().filter(|p| p.player == player).count()
    }
}
