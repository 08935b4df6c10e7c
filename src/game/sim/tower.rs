//! Simulated tower.
//!
//! Towers are stationary and only ever act on enemy units: acquire the lowest-index
//! in-range enemy, fire if off cooldown, reset cooldown. No splash; `splash`-type
//! towers deal their listed damage to a single target like every other type (see
//! the tower balance notes for why this differs from the type's name).

use crate::core::vec2::Vec2;
use crate::game::player::PlayerId;
use crate::game::sim::unit::SimUnit;

/// One tower's live state during combat.
#[derive(Clone, Debug)]
pub struct SimTower {
    pub player: PlayerId,
    pub tower_type: String,
    pub pos: Vec2,
    pub damage: f64,
    pub range_px: f64,
    pub cooldown_ticks: u32,
    pub current_cooldown: u32,
}

impl SimTower {
    /// Tick down cooldown, then fire at the lowest-index in-range enemy if ready.
    /// Returns the id of the unit killed by this shot, if any.
    pub fn update(&mut self, units: &mut [SimUnit]) -> Option<usize> {
        if self.current_cooldown > 0 {
            self.current_cooldown -= 1;
            return None;
        }
        let target = units.iter_mut().find(|u| {
            u.player != self.player && u.is_alive_and_active() && self.pos.distance_squared(u.pos) <= self.range_px * self.range_px
        });
        let Some(target) = target else {
            return None;
        };
        target.take_damage(self.damage);
        self.current_cooldown = self.cooldown_ticks;
        if !target.is_alive_and_active() && target.hp <= 0.0 {
            Some(target.id)
        } else {
            None
        }
    }
}
