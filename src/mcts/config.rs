//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Iterations run for a multiplier of 1.0 (default: 1000).
    pub base_iterations: u32,

    /// UCT exploration constant (default: 1.0).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Random seed for expansion and rollouts.
    /// `None` seeds from entropy, so repeated searches differ.
    pub seed: Option<u64>,

    /// Stop early once the tree holds this many nodes (0 = unlimited).
    /// An unlimited search still fails with `TreeError::ArenaFull` past
    /// `u32::MAX - 1` nodes.
    pub max_nodes: usize,

    /// Stop early after this many milliseconds of search.
    pub time_limit_ms: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            base_iterations: 1000,
            exploration_constant: 1.0,
            seed: None,
            max_nodes: 0,
            time_limit_ms: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a custom baseline iteration count.
    pub fn with_base_iterations(mut self, iterations: u32) -> Self {
        self.base_iterations = iterations;
        self
    }

    /// Create a new config with a node cap.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Create a new config with a wall-clock limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Iterations for a given budget multiplier: `floor(base * multiplier)`.
    ///
    /// Negative or non-finite products yield 0.
    #[must_use]
    pub fn iterations_for(&self, multiplier: f64) -> u32 {
        let scaled = (f64::from(self.base_iterations) * multiplier).floor();
        if !scaled.is_finite() || scaled <= 0.0 {
            0
        } else if scaled >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            scaled as u32
        }
    }
}
