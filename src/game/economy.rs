//! Economy
//!
//! Per-player gold and lives. Every mutating method validates before applying and
//! never leaves a player in an invalid state (invariant 1 in spec.md §3: gold and
//! lives are non-negative, lives never exceed `START_LIVES`).

use std::collections::BTreeMap;

use crate::balance::{START_GOLD, START_LIVES};
use crate::error::GameError;
use crate::game::combat::RoundResult;
use crate::game::player::PlayerId;

#[derive(Clone, Copy, Debug)]
struct PlayerEconomy {
    gold: u32,
    lives: u32,
}

/// Gold and lives for both players.
#[derive(Clone, Debug)]
pub struct Economy {
    players: BTreeMap<PlayerId, PlayerEconomy>,
}

impl Economy {
    /// Both players start with `START_GOLD` gold and `START_LIVES` lives.
    pub fn new() -> Self {
        let mut players = BTreeMap::new();
        players.insert(PlayerId::A, PlayerEconomy { gold: START_GOLD, lives: START_LIVES });
        players.insert(PlayerId::B, PlayerEconomy { gold: START_GOLD, lives: START_LIVES });
        Self { players }
    }

    fn get(&self, player: PlayerId) -> PlayerEconomy {
        // Both players are always present; constructed once in `new`.
        self.players[&player]
    }

    pub fn gold(&self, player: PlayerId) -> u32 {
        self.get(player).gold
    }

    pub fn lives(&self, player: PlayerId) -> u32 {
        self.get(player).lives
    }

    /// Deduct `amount` gold, failing if the player can't afford it.
    pub fn spend_gold(&mut self, player: PlayerId, amount: u32) -> Result<(), GameError> {
        let entry = self.players.get_mut(&player).expect("both players always present");
        if entry.gold < amount {
            return Err(GameError::InsufficientGold);
        }
        entry.gold -= amount;
        Ok(())
    }

    /// Add gold, saturating (gold has no upper bound in spec.md).
    pub fn add_gold(&mut self, player: PlayerId, amount: u32) {
        let entry = self.players.get_mut(&player).expect("both players always present");
        entry.gold = entry.gold.saturating_add(amount);
    }

    /// Remove lives, saturating at 0.
    pub fn lose_lives(&mut self, player: PlayerId, amount: u32) {
        let entry = self.players.get_mut(&player).expect("both players always present");
        entry.lives = entry.lives.saturating_sub(amount);
    }

    /// Apply a completed round's result to both players in one step.
    pub fn apply_round_result(&mut self, result: &RoundResult) {
        self.lose_lives(PlayerId::A, result.lives_lost_a);
        self.lose_lives(PlayerId::B, result.lives_lost_b);
        self.add_gold(PlayerId::A, result.gold_earned_a);
        self.add_gold(PlayerId::B, result.gold_earned_b);
    }

    /// The winner, if exactly one player has reached 0 lives.
    pub fn winner(&self) -> Option<PlayerId> {
        let a_dead = self.lives(PlayerId::A) == 0;
        let b_dead = self.lives(PlayerId::B) == 0;
        match (a_dead, b_dead) {
            (true, false) => Some(PlayerId::B),
            (false, true) => Some(PlayerId::A),
            _ => None,
        }
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

/// Gold and lives for both players, detached from the mutex-guarded `Economy` so it
/// can be broadcast without holding `GameStateManager`'s lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomyView {
    pub gold_a: u32,
    pub gold_b: u32,
    pub lives_a: u32,
    pub lives_b: u32,
}

impl Economy {
    pub fn view(&self) -> EconomyView {
        EconomyView {
            gold_a: self.gold(PlayerId::A),
            gold_b: self.gold(PlayerId::B),
            lives_a: self.lives(PlayerId::A),
            lives_b: self.lives(PlayerId::B),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_balance_defaults() {
        let e = Economy::new();
        assert_eq!(e.gold(PlayerId::A), START_GOLD);
        assert_eq!(e.lives(PlayerId::A), START_LIVES);
    }

    #[test]
    fn spend_gold_rejects_insufficient_funds() {
        let mut e = Economy::new();
        let err = e.spend_gold(PlayerId::A, START_GOLD + 1).unwrap_err();
        assert_eq!(err, GameError::InsufficientGold);
        assert_eq!(e.gold(PlayerId::A), START_GOLD, "failed spend must not change state");
    }

    #[test]
    fn spend_gold_applies_on_success() {
        let mut e = Economy::new();
        e.spend_gold(PlayerId::A, 20).unwrap();
        assert_eq!(e.gold(PlayerId::A), START_GOLD - 20);
    }

    #[test]
    fn lose_lives_saturates_at_zero() {
        let mut e = Economy::new();
        e.lose_lives(PlayerId::A, START_LIVES + 5);
        assert_eq!(e.lives(PlayerId::A), 0);
    }

    #[test]
    fn winner_is_none_until_someone_hits_zero_lives() {
        let mut e = Economy::new();
        assert_eq!(e.winner(), None);
        e.lose_lives(PlayerId::A, START_LIVES);
        assert_eq!(e.winner(), Some(PlayerId::B));
    }

    #[test]
    fn apply_round_result_combines_lives_and_gold() {
        let mut e = Economy::new();
        let result = RoundResult { lives_lost_a: 2, lives_lost_b: 0, gold_earned_a: 0, gold_earned_b: 10 };
        e.apply_round_result(&result);
        assert_eq!(e.lives(PlayerId::A), START_LIVES - 2);
        assert_eq!(e.gold(PlayerId::B), START_GOLD + 10);
    }
}
