//! Simulated unit.
//!
//! A unit walks its route's waypoint list at a fixed speed. Overshoot past a waypoint
//! in a single tick carries into the next leg rather than being dropped, so fast units
//! on short legs don't lose distance.

use crate::balance::SIM_DT;
use crate::core::vec2::Vec2;
use crate::game::player::PlayerId;

/// One unit's live state during combat.
#[derive(Clone, Debug)]
pub struct SimUnit {
    /// Index into the master unit list; stable for the whole round.
    pub id: usize,
    pub player: PlayerId,
    pub unit_type: String,
    pub path: Vec<Vec2>,
    pub waypoint_idx: usize,
    pub pos: Vec2,
    pub hp: f64,
    pub speed_px_per_s: f64,
    pub spawn_tick: u32,
    /// Currently walking the route.
    pub active: bool,
    /// Crossed the final waypoint; counts against the defending player's lives.
    pub reached_base: bool,
}

impl SimUnit {
    /// True if this unit still has work left to do this round: either on the route
    /// right now, or waiting for its spawn tick to arrive.
    pub fn is_pending(&self) -> bool {
        self.active || (!self.reached_base && self.hp > 0.0)
    }

    /// Activate a unit whose spawn tick has arrived, placing it at the route start.
    /// `path[0]` is the spawn point itself, so the next target is `path[1]`.
    pub fn activate(&mut self) {
        self.active = true;
        if let Some(&start) = self.path.first() {
            self.pos = start;
        }
        self.waypoint_idx = 1;
    }

    /// Advance along the route by one tick's worth of distance, possibly crossing
    /// several waypoints if speed outpaces a short leg.
    pub fn step(&mut self) {
        if !self.active {
            return;
        }
        let mut remaining = self.speed_px_per_s * SIM_DT;
        while remaining > 0.0 && self.active {
            let Some(&target) = self.path.get(self.waypoint_idx) else {
                self.active = false;
                self.reached_base = true;
                return;
            };
            let to_target = target.sub(self.pos);
            let leg = to_target.length();
            if leg <= remaining {
                self.pos = target;
                remaining -= leg;
                if self.waypoint_idx + 1 >= self.path.len() {
                    self.active = false;
                    self.reached_base = true;
                } else {
                    self.waypoint_idx += 1;
                }
            } else {
                let dir = self.pos.direction_to(target);
                self.pos = self.pos.add(dir.scale(remaining));
                remaining = 0.0;
            }
        }
    }

    /// Apply damage, deactivating the unit if it dies. Dying is not reaching base.
    pub fn take_damage(&mut self, amount: f64) {
        self.hp -= amount;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.active = false;
        }
    }

    pub fn is_alive_and_active(&self) -> bool {
        self.active && self.hp > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]
    }

    fn make_unit() -> SimUnit {
        SimUnit {
            id: 0,
            player: PlayerId::A,
            unit_type: "standard".to_string(),
            path: straight_path(),
            waypoint_idx: 0,
            pos: Vec2::ZERO,
            hp: 10.0,
            speed_px_per_s: 40.0,
            spawn_tick: 0,
            active: false,
            reached_base: false,
        }
    }

    #[test]
    fn activate_places_unit_at_path_start() {
        let mut u = make_unit();
        u.path = vec![Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)];
        u.activate();
        assert!(u.active);
        assert_eq!(u.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn step_moves_toward_next_waypoint() {
        let mut u = make_unit();
        u.activate();
        u.step();
        assert_eq!(u.waypoint_idx, 1, "still en route to the one remaining waypoint");
        assert_eq!(u.pos, Vec2::new(2.0, 0.0));
        assert!(u.active);
    }

    #[test]
    fn overshoot_reaches_base_and_carries_no_further() {
        let mut u = make_unit();
        u.speed_px_per_s = 10_000.0;
        u.activate();
        u.step();
        assert!(!u.active);
        assert!(u.reached_base);
        assert_eq!(u.pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn take_damage_kills_without_reaching_base() {
        let mut u = make_unit();
        u.activate();
        u.take_damage(100.0);
        assert!(!u.active);
        assert!(!u.reached_base);
        assert_eq!(u.hp, 0.0);
    }

    #[test]
    fn pending_covers_pre_spawn_active_and_excludes_terminal() {
        let mut u = make_unit();
        assert!(u.is_pending(), "pre-spawn units are still pending");
        u.activate();
        assert!(u.is_pending());
        u.take_damage(100.0);
        assert!(!u.is_pending(), "dead units are no longer pending");
    }
}
