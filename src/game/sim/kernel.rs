//! Combat kernel.
//!
//! `GameState::update_tick` is the single deterministic step run by
//! `game::combat::CombatRunner`: activate spawns, move units, fire towers, advance the
//! tick counter. Everything here operates on plain `Vec`s in snapshot order — no
//! `HashMap`, no wall-clock time, no randomness.

use crate::balance::{self, MIN_SIM_SECONDS, SIM_DT, TAIL_SECONDS};
use crate::game::player::PlayerId;
use crate::game::sim::tower::SimTower;
use crate::game::sim::unit::SimUnit;
use crate::game::snapshot::SimulationData;

/// Live combat state for one round.
pub struct GameState {
    pub current_tick: u32,
    pub units: Vec<SimUnit>,
    pub towers: Vec<SimTower>,
    last_pending_tick: u32,
    kills_by: [u32; 2],
}

fn player_slot(p: PlayerId) -> usize {
    match p {
        PlayerId::A => 0,
        PlayerId::B => 1,
    }
}

impl GameState {
    /// Build combat state from a round's frozen snapshot.
    pub fn new(data: &SimulationData) -> Self {
        let units = data
            .units
            .iter()
            .enumerate()
            .map(|(id, u)| {
                let stats = balance::unit_stats().get(u.unit_type.as_str());
                let (hp, speed) = stats.map(|s| (s.health, s.speed_px_per_s)).unwrap_or((0.0, 0.0));
                let path = balance::route_waypoints(u.route);
                let pos = path.first().copied().unwrap_or_default();
                SimUnit {
                    id,
                    player: u.player,
                    unit_type: u.unit_type.clone(),
                    path,
                    waypoint_idx: 0,
                    pos,
                    hp,
                    speed_px_per_s: speed,
                    spawn_tick: u.spawn_tick,
                    active: false,
                    reached_base: false,
                }
            })
            .collect();

        let towers = data
            .towers
            .iter()
            .map(|t| {
                let stats = balance::tower_stats().get(t.tower_type.as_str());
                let (damage, range_px, cooldown_ticks) =
                    stats.map(|s| (s.damage, s.range_px, s.cooldown_ticks)).unwrap_or((0.0, 0.0, 0));
                SimTower {
                    player: t.player,
                    tower_type: t.tower_type.clone(),
                    pos: t.position(),
                    damage,
                    range_px,
                    cooldown_ticks,
                    current_cooldown: 0,
                }
            })
            .collect();

        Self { current_tick: 0, units, towers, last_pending_tick: 0, kills_by: [0, 0] }
    }

    /// Run one tick: activate due spawns, move units, let towers fire, advance time.
    pub fn update_tick(&mut self) {
        let tick = self.current_tick;
        for unit in &mut self.units {
            if !unit.active && !unit.reached_base && unit.hp > 0.0 && unit.spawn_tick == tick {
                unit.activate();
            }
        }
        for unit in &mut self.units {
            unit.step();
        }
        for tower in &mut self.towers {
            if let Some(killed_id) = tower.update(&mut self.units) {
                let _ = killed_id;
                self.kills_by[player_slot(tower.player)] += 1;
            }
        }
        if self.units.iter().any(SimUnit::is_pending) {
            self.last_pending_tick = tick;
        }
        self.current_tick += 1;
    }

    /// True once at least `MIN_SIM_SECONDS` have run and the round has been quiet
    /// (no active or not-yet-spawned unit) for `TAIL_SECONDS`.
    pub fn is_simulation_complete(&self) -> bool {
        let elapsed = self.current_tick as f64 * SIM_DT;
        if elapsed < MIN_SIM_SECONDS {
            return false;
        }
        let quiet_for = (self.current_tick - self.last_pending_tick) as f64 * SIM_DT;
        quiet_for >= TAIL_SECONDS
    }

    /// Units belonging to `attacker` that reached `attacker`'s opponent's base.
    pub fn units_reached_base(&self, attacker: PlayerId) -> u32 {
        self.units.iter().filter(|u| u.player == attacker && u.reached_base).count() as u32
    }

    /// Enemy units `defender` killed with towers.
    pub fn kills_by(&self, defender: PlayerId) -> u32 {
        self.kills_by[player_slot(defender)]
    }
}
