//! # connect-four-mcts
//!
//! Connect Four rules plus a Monte Carlo Tree Search player.
//!
//! ## Design Principles
//!
//! 1. **Value-copied boards**: Every tree node and every rollout owns its
//!    own `BoardState`. Nothing is shared mutably.
//!
//! 2. **Arena tree**: Nodes are indexed by `NodeId`; the parent link is an
//!    index, so there is no ownership cycle.
//!
//! 3. **Pluggable policies**: Selection scoring and rollouts are traits, and
//!    the random source is injectable for deterministic tests.
//!
//! ## Modules
//!
//! - `core`: Players, cells, the board, and the random source
//! - `rules`: Outcome detection (four in a row, draw)
//! - `mcts`: Monte Carlo Tree Search

pub mod core;
pub mod rules;
pub mod mcts;

// Re-export commonly used types
pub use crate::core::{BoardError, BoardState, Cell, PerPlayer, Player, SearchRng};

pub use crate::rules::Outcome;

pub use crate::mcts::{
    BestMove, MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, NodeId, SearchError, SearchStats,
    TreeError, TreeStats, SelectionPolicy, SimulationPolicy, RandomSimulation, Rollout, UCB1, UCT,
};
