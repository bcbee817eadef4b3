//! Arena-based MCTS tree.
//!
//! Nodes sit in a flat `Vec<MCTSNode>` and link to each other by index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::node::{MCTSNode, NodeId};
use crate::core::{BoardError, BoardState, SearchRng};
use crate::rules::Outcome;

/// Errors raised while growing the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    /// Every `NodeId` below the `NONE` sentinel is taken.
    #[error("node arena is full at {nodes} nodes")]
    ArenaFull { nodes: usize },

    #[error("tree depth exceeds {max}", max = u16::MAX)]
    DepthOverflow,
}

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// Pending children live in the arena too, so `len()` counts them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    /// All nodes in the tree, pending children included.
    nodes: Vec<MCTSNode>,

    /// The root node ID (always 0 after initialization).
    root: NodeId,
}

impl MCTSTree {
    /// Create a tree whose root wraps `board`.
    pub fn new(board: BoardState) -> Result<Self, TreeError> {
        Self::with_capacity(board, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(board: BoardState, capacity: usize) -> Result<Self, TreeError> {
        let mut tree = Self {
            nodes: Vec::with_capacity(capacity),
            root: NodeId::new(0),
        };
        tree.nodes.push(MCTSNode::root(board));
        tree.generate_children(tree.root)?;
        Ok(tree)
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, node: MCTSNode) -> Result<NodeId, TreeError> {
        let id = node_id_for(self.nodes.len())?;
        self.nodes.push(node);
        Ok(id)
    }

    /// Number of nodes in the arena, pending children included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root)
    }

    /// Discard every node and start over from `board`.
    pub fn reset(&mut self, board: BoardState) -> Result<(), TreeError> {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(board));
        self.root = NodeId::new(0);
        self.generate_children(self.root)
    }

    /// Fill a node's pending list: one child per legal move, ascending,
    /// each holding the post-move board with the turn passed on.
    fn generate_children(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.get(id);
        let board = node.board().clone();
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Ok(());
        }
        let depth = child_depth(node.depth())?;

        for column in legal {
            let mut child_board = board.clone();
            child_board.apply_move(column)?;
            child_board.switch_mover();

            let child = self.alloc(MCTSNode::new(id, column, child_board, depth))?;
            self.get_mut(id).push_pending(child);
        }
        Ok(())
    }

    /// Move one uniformly chosen pending child of `id` to its explored list
    /// and return it, with its own children generated.
    ///
    /// Returns `id` itself when nothing is pending.
    pub fn promote(&mut self, id: NodeId, rng: &mut SearchRng) -> Result<NodeId, TreeError> {
        let pending = self.get(id).pending().len();
        if pending == 0 {
            return Ok(id);
        }

        let index = rng.gen_range_usize(0..pending);
        let child = self.get_mut(id).promote_pending(index);
        self.generate_children(child)?;
        Ok(child)
    }

    /// Count `outcome` on `from` and every ancestor up to the root.
    ///
    /// Returns the number of nodes updated.
    pub fn backpropagate(&mut self, from: NodeId, outcome: Outcome) -> usize {
        let mut current = from;
        let mut updated = 0;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.record(outcome);
            current = node.parent();
            updated += 1;
        }
        updated
    }

    /// Explored child with the most simulations; ties keep the earlier child.
    #[must_use]
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for &child in self.get(id).explored() {
            let visits = self.get(child).simulation_count();
            match best {
                Some((_, most)) if visits <= most => {}
                _ => best = Some((child, visits)),
            }
        }
        best.map(|(child, _)| child)
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };

        // Walk only nodes that joined the tree; pending placeholders are
        // counted through their parents.
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.get(id);
            stats.explored_count += 1;
            stats.pending_count += node.pending().len();
            stats.max_depth = stats.max_depth.max(node.depth());
            if node.is_terminal() {
                stats.terminal_count += 1;
            }
            stack.extend_from_slice(node.explored());
        }

        stats
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Id for the node stored at `index`, which must stay below `NodeId::NONE`.
fn node_id_for(index: usize) -> Result<NodeId, TreeError> {
    u32::try_from(index)
        .ok()
        .filter(|&raw| raw < NodeId::NONE.raw())
        .map(NodeId::new)
        .ok_or(TreeError::ArenaFull { nodes: index })
}

fn child_depth(depth: u16) -> Result<u16, TreeError> {
    depth.checked_add(1).ok_or(TreeError::DepthOverflow)
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes in the arena.
    pub node_count: usize,

    /// Nodes that joined the tree (root plus promoted children).
    pub explored_count: usize,

    /// Children generated but never sampled.
    pub pending_count: usize,

    /// Tree nodes whose board is decided.
    pub terminal_count: usize,

    /// Deepest tree node (root = 0).
    pub max_depth: u16,
}

impl TreeStats {
    /// Share of generated children that have been sampled.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        let children = self.explored_count.saturating_sub(1) + self.pending_count;
        if children == 0 {
            0.0
        } else {
            (self.explored_count - 1) as f64 / children as f64
        }
    }
}
