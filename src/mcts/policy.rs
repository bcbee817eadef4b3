//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to score explored children (UCT, UCB1)
//! - `SimulationPolicy`: How to play a rollout to the end of the game

use std::cmp::Ordering;

use crate::core::{BoardError, BoardState, SearchRng};
use crate::rules::Outcome;

use super::config::MCTSConfig;
use super::node::{MCTSNode, NodeId};
use super::tree::MCTSTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for choosing which explored child to descend into.
pub trait SelectionPolicy: Send + Sync {
    /// Score `child` from the point of view of the player to move at `parent`.
    fn score(&self, parent: &MCTSNode, child: &MCTSNode, config: &MCTSConfig) -> f64;

    /// Pick the highest-scoring explored child of `node`.
    ///
    /// Ties go to the child explored first. Returns `None` when nothing has
    /// been explored.
    fn select(&self, tree: &MCTSTree, node: NodeId, config: &MCTSConfig) -> Option<NodeId> {
        let parent = tree.get(node);
        let mut best: Option<(NodeId, f64)> = None;

        for &child in parent.explored() {
            let score = self.score(parent, tree.get(child), config);
            match best {
                Some((_, top)) if score.partial_cmp(&top) != Some(Ordering::Greater) => {}
                _ => best = Some((child, score)),
            }
        }

        best.map(|(child, _)| child)
    }
}

/// UCT scoring with raw win counts (the default policy).
///
/// Formula: W + floor(D / 2) / n + c * sqrt(ln(N) / n)
///
/// `W` is the raw win count of the parent's mover (not a rate) and the draw
/// half-credit is truncated by integer division before dividing by `n`.
#[derive(Clone, Debug, Default)]
pub struct UCT;

impl SelectionPolicy for UCT {
    fn score(&self, parent: &MCTSNode, child: &MCTSNode, config: &MCTSConfig) -> f64 {
        let visits = child.simulation_count();
        if visits == 0 {
            return f64::INFINITY;
        }

        let mover = parent.board().mover();
        let visits = f64::from(visits);
        let wins = f64::from(child.win_count(mover));
        let draw_bonus = f64::from(child.draw_count() / 2) / visits;
        let exploration = config.exploration_constant
            * (f64::from(parent.simulation_count()).ln() / visits).sqrt();

        wins + draw_bonus + exploration
    }
}

/// Textbook UCB1 with draws worth half a win.
///
/// Formula: (W + D / 2) / n + c * sqrt(ln(N) / n)
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn score(&self, parent: &MCTSNode, child: &MCTSNode, config: &MCTSConfig) -> f64 {
        let visits = child.simulation_count();
        if visits == 0 {
            return f64::INFINITY;
        }

        let mover = parent.board().mover();
        let visits = f64::from(visits);
        let reward = f64::from(child.win_count(mover)) + 0.5 * f64::from(child.draw_count());
        let ln_parent = f64::from(parent.simulation_count().max(1)).ln();

        reward / visits + config.exploration_constant * (ln_parent / visits).sqrt()
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Result of a single rollout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rollout {
    /// Terminal outcome reached.
    pub outcome: Outcome,
    /// Moves played to get there.
    pub moves: u32,
}

/// Policy for playing a board out to a decided outcome.
pub trait SimulationPolicy: Send + Sync {
    /// Play `board` (a private copy) until the game is decided.
    fn rollout(&self, board: BoardState, rng: &mut SearchRng) -> Result<Rollout, BoardError>;
}

/// Random simulation policy.
///
/// Drops markers into uniformly random legal columns until the game ends.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl SimulationPolicy for RandomSimulation {
    fn rollout(&self, mut board: BoardState, rng: &mut SearchRng) -> Result<Rollout, BoardError> {
        let mut moves = 0;

        // No legal moves means the board is decided: won, or full and drawn.
        while let Some(&column) = rng.choose(&board.legal_moves()) {
            board.apply_move(column)?;
            board.switch_mover();
            moves += 1;
        }

        Ok(Rollout {
            outcome: board.outcome(),
            moves,
        })
    }
}
