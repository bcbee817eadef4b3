//! Core MCTS search algorithm.
//!
//! Each iteration runs four phases:
//! 1. Selection: descend through fully expanded nodes by the selection policy
//! 2. Expansion: promote one random pending child of the selected node
//! 3. Simulation: random rollout from that child's board
//! 4. Backpropagation: count the outcome on the child and all its ancestors

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{BoardError, BoardState, Player, SearchRng};

use super::config::MCTSConfig;
use super::node::NodeId;
use super::policy::{RandomSimulation, Rollout, SelectionPolicy, SimulationPolicy, UCT};
use super::stats::SearchStats;
use super::tree::{MCTSTree, TreeError};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search budget allowed no iterations")]
    NoIterations,

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// The move chosen by a search, with the evidence behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct BestMove {
    /// Column to play.
    pub column: usize,

    /// Player the move is chosen for.
    pub mover: Player,

    /// Simulations that passed through the chosen child.
    pub simulations: u32,

    /// Of those, how many `mover` won.
    pub wins: u32,

    /// `wins / simulations`.
    pub win_probability: f64,
}

impl BestMove {
    /// Win probability as a rounded percentage.
    #[must_use]
    pub fn win_percentage(&self) -> u32 {
        (self.win_probability * 100.0).round() as u32
    }
}

impl std::fmt::Display for BestMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "column {} for {}: {} wins in {} simulations, estimated win probability {}%",
            self.column,
            self.mover,
            self.wins,
            self.simulations,
            self.win_percentage()
        )
    }
}

/// Main MCTS search context.
///
/// Holds the position to search from, the configuration, and the policies.
/// Every `find_best_move` call builds a fresh tree; nothing is reused
/// between calls.
pub struct MCTSSearch {
    /// Position the tree is rooted at.
    board: BoardState,

    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree,

    /// RNG for expansion; rollouts use forks of it.
    rng: SearchRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Search statistics.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Create a search rooted at a copy of `board`.
    pub fn new(board: &BoardState, config: MCTSConfig) -> Result<Self, SearchError> {
        let board = board.clone();
        let tree = MCTSTree::new(board.clone())?;
        let rng = SearchRng::from_seed(config.seed);

        Ok(Self {
            board,
            config,
            tree,
            rng,
            selection: Box::new(UCT),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Replace the random source, overriding the configured seed.
    pub fn with_rng(mut self, rng: SearchRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run `floor(base_iterations * iteration_multiplier)` iterations and
    /// return the most visited move at the root.
    pub fn find_best_move(&mut self, iteration_multiplier: f64) -> Result<BestMove, SearchError> {
        let start = Instant::now();
        self.stats.reset();
        self.tree.reset(self.board.clone())?;

        let iterations = self.config.iterations_for(iteration_multiplier);
        debug!(
            iterations,
            mover = %self.board.mover(),
            legal_moves = self.tree.root_node().pending().len(),
            "starting search"
        );

        for _ in 0..iterations {
            self.iteration()?;
            self.stats.iterations += 1;

            if self.budget_exhausted(start) {
                debug!(
                    iterations = self.stats.iterations,
                    nodes = self.tree.len(),
                    "search budget exhausted"
                );
                break;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let best = self.best_move()?;
        debug!(
            column = best.column,
            simulations = best.simulations,
            win_probability = best.win_probability,
            time_us = self.stats.time_us,
            iterations_per_second = self.stats.iterations_per_second(),
            avg_rollout_length = self.stats.avg_rollout_length(),
            "search complete"
        );
        Ok(best)
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self) -> Result<(), SearchError> {
        let selected = self.select();
        let expanded = self.expand(selected)?;
        let rollout = self.simulate(expanded)?;
        self.tree.backpropagate(expanded, rollout.outcome);

        trace!(
            selected = %selected,
            expanded = %expanded,
            outcome = %rollout.outcome,
            moves = rollout.moves,
            "iteration"
        );
        Ok(())
    }

    /// Descend while the current node is fully expanded and has explored
    /// children.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if !node.is_fully_expanded() || node.is_tree_leaf() {
                return current;
            }
            match self.selection.select(&self.tree, current, &self.config) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Promote a pending child, or stay on a node that has none.
    fn expand(&mut self, node: NodeId) -> Result<NodeId, SearchError> {
        if self.tree.get(node).is_fully_expanded() {
            return Ok(node);
        }

        let child = self.tree.promote(node, &mut self.rng)?;
        self.stats.record_promotion(self.tree.get(child).depth());
        Ok(child)
    }

    /// Roll out a copy of the node's board. The tree is not touched.
    fn simulate(&mut self, node: NodeId) -> Result<Rollout, SearchError> {
        let board = self.tree.get(node).board().clone();
        let mut sim_rng = self.rng.fork();
        let rollout = self.simulation.rollout(board, &mut sim_rng)?;
        self.stats.record_rollout(&rollout);
        Ok(rollout)
    }

    fn budget_exhausted(&self, start: Instant) -> bool {
        if self.config.max_nodes > 0 && self.tree.len() >= self.config.max_nodes {
            return true;
        }
        match self.config.time_limit_ms {
            Some(ms) => start.elapsed() >= Duration::from_millis(ms),
            None => false,
        }
    }

    /// Most simulated root child, reported by its originating column.
    fn best_move(&self) -> Result<BestMove, SearchError> {
        let root = self.tree.root_node();
        let Some(best) = self.tree.most_visited_child(self.tree.root()) else {
            return Err(if root.board().legal_moves().is_empty() {
                SearchError::NoLegalMoves
            } else {
                SearchError::NoIterations
            });
        };

        let child = self.tree.get(best);
        let column = child.column().ok_or_else(|| {
            SearchError::InvalidState(format!("{} has no originating column", best))
        })?;

        let mover = root.board().mover();
        Ok(BestMove {
            column,
            mover,
            simulations: child.simulation_count(),
            wins: child.win_count(mover),
            win_probability: child.win_rate(mover),
        })
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Position the search is rooted at.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Visit counts of explored root children as (column, visits), by column.
    pub fn action_visits(&self) -> Vec<(usize, u32)> {
        let mut visits: Vec<(usize, u32)> = self
            .tree
            .root_node()
            .explored()
            .iter()
            .filter_map(|&id| {
                let node = self.tree.get(id);
                node.column().map(|column| (column, node.simulation_count()))
            })
            .collect();
        visits.sort_unstable_by_key(|&(column, _)| column);
        visits
    }

    /// Share of root visits per explored column; sums to ~1.0.
    pub fn action_probabilities(&self) -> Vec<(usize, f64)> {
        let visits = self.action_visits();
        let total: u32 = visits.iter().map(|&(_, v)| v).sum();

        if total == 0 {
            let uniform = 1.0 / visits.len().max(1) as f64;
            return visits.iter().map(|&(column, _)| (column, uniform)).collect();
        }

        visits
            .iter()
            .map(|&(column, v)| (column, f64::from(v) / f64::from(total)))
            .collect()
    }
}
