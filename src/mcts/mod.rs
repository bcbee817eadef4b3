//! Monte Carlo Tree Search for Connect Four.
//!
//! ## Overview
//!
//! Classic four-phase MCTS with random rollouts:
//!
//! - **Arena tree**: Nodes own a board snapshot and link to their parent by index
//! - **Pending / explored children**: Children are generated per legal move and
//!   promoted into the tree one at a time, in random order
//! - **Configurable Policies**: Selection (UCT, UCB1) and simulation
//! - **Reproducible on demand**: Seed the config or inject a `SearchRng`
//!
//! ## Usage
//!
//! ```rust
//! use connect_four_mcts::core::{BoardState, Player};
//! use connect_four_mcts::mcts::{MCTSConfig, MCTSSearch};
//!
//! let board = BoardState::new(7, 6, Player::A);
//! let config = MCTSConfig::default().with_base_iterations(200).with_seed(7);
//! let mut search = MCTSSearch::new(&board, config).unwrap();
//!
//! let best = search.find_best_move(1.0).unwrap();
//! assert!(board.legal_moves().contains(&best.column));
//! println!("{}", best);
//! ```
//!
//! ## Custom Policies
//!
//! ```rust
//! use connect_four_mcts::core::{BoardState, Player};
//! use connect_four_mcts::mcts::{MCTSConfig, MCTSSearch, UCB1};
//!
//! let board = BoardState::new(7, 6, Player::A);
//! let search = MCTSSearch::new(&board, MCTSConfig::default())
//!     .unwrap()
//!     .with_selection(UCB1); // Normalized win rates instead of raw counts
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{RandomSimulation, Rollout, SelectionPolicy, SimulationPolicy, UCB1, UCT};
pub use search::{BestMove, MCTSSearch, SearchError};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeError, TreeStats};
