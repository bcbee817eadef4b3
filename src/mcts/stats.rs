//! Counters gathered while a search runs.

use serde::{Deserialize, Serialize};

use crate::core::{PerPlayer, Player};
use crate::rules::Outcome;

use super::policy::Rollout;

/// What one `find_best_move` call did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed iterations.
    pub iterations: u32,

    /// Pending children promoted into the tree.
    pub promotions: u32,

    /// Rollouts played.
    pub simulations: u32,

    /// Moves played across all rollouts.
    pub rollout_moves: u64,

    /// Rollouts won by each player.
    pub rollout_wins: PerPlayer<u32>,

    /// Rollouts ending in a full board.
    pub rollout_draws: u32,

    /// Deepest promoted node (root = 0).
    pub max_depth: u16,

    /// Wall-clock time of the search (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_promotion(&mut self, depth: u16) {
        self.promotions += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub(crate) fn record_rollout(&mut self, rollout: &Rollout) {
        self.simulations += 1;
        self.rollout_moves += u64::from(rollout.moves);
        match rollout.outcome.winner() {
            Some(player) => self.rollout_wins[player] += 1,
            None if rollout.outcome == Outcome::Draw => self.rollout_draws += 1,
            None => {}
        }
    }

    /// Share of rollouts `player` won, over the whole search.
    #[must_use]
    pub fn rollout_win_rate(&self, player: Player) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            f64::from(self.rollout_wins[player]) / f64::from(self.simulations)
        }
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) * 1_000_000.0 / self.time_us as f64
        }
    }

    /// Mean number of moves per rollout.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_moves as f64 / f64::from(self.simulations)
        }
    }
}
