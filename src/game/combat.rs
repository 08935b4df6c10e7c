//! Combat runner
//!
//! Runs one round's `SimulationData` to completion against the deterministic kernel
//! in `game::sim` and reduces the outcome to lives lost and gold earned for both
//! players. `GameStateManager::apply_round_result` feeds this straight into `Economy`.

use serde::{Serialize, Deserialize};

use crate::balance::GOLD_PER_KILL;
use crate::game::player::PlayerId;
use crate::game::sim::GameState;
use crate::game::snapshot::SimulationData;

/// Outcome of one round of combat, ready to apply to `Economy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundResult {
    pub lives_lost_a: u32,
    pub lives_lost_b: u32,
    pub gold_earned_a: u32,
    pub gold_earned_b: u32,
}

/// Runs a round's simulation to termination.
pub struct CombatRunner;

impl CombatRunner {
    /// Step the kernel until `is_simulation_complete`, then reduce to a `RoundResult`.
    ///
    /// Lives lost by a player equal units *their opponent* walked to base; gold earned
    /// is `GOLD_PER_KILL` times the enemy units that player's towers killed.
    pub fn run(data: &SimulationData) -> RoundResult {
        let mut state = GameState::new(data);
        while !state.is_simulation_complete() {
            state.update_tick();
        }

        let lives_lost_a = state.units_reached_base(PlayerId::B);
        let lives_lost_b = state.units_reached_base(PlayerId::A);
        let gold_earned_a = state.kills_by(PlayerId::A) * GOLD_PER_KILL;
        let gold_earned_b = state.kills_by(PlayerId::B) * GOLD_PER_KILL;

        RoundResult { lives_lost_a, lives_lost_b, gold_earned_a, gold_earned_b }
    }
}
