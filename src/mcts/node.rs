//! MCTS node structures.
//!
//! Nodes live in the `MCTSTree` arena and refer to each other by `NodeId`,
//! so the parent link is a plain index rather than an owning pointer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BoardState, PerPlayer, Player};
use crate::rules::Outcome;

/// Child lists; Connect Four rarely exceeds 8 columns.
pub type ChildList = SmallVec<[NodeId; 8]>;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the MCTS tree.
///
/// Holds its own board snapshot. Children are split into `pending` (not
/// yet sampled, in ascending column order) and `explored` (sampled at least
/// once, in promotion order). Both lists are filled when the node joins the
/// tree: the root on construction, every other node on promotion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    board: BoardState,

    /// Parent node (NONE for root).
    parent: NodeId,

    /// Column played from the parent's board to reach this one.
    column: Option<usize>,

    /// Depth in tree (root = 0).
    depth: u16,

    pending: ChildList,
    explored: ChildList,

    simulations: u32,
    wins: PerPlayer<u32>,
    draws: u32,
}

impl MCTSNode {
    /// Create a child node reached by playing `column` from `parent`.
    pub fn new(parent: NodeId, column: usize, board: BoardState, depth: u16) -> Self {
        Self {
            board,
            parent,
            column: Some(column),
            depth,
            pending: ChildList::new(),
            explored: ChildList::new(),
            simulations: 0,
            wins: PerPlayer::default(),
            draws: 0,
        }
    }

    /// Create a root node.
    pub fn root(board: BoardState) -> Self {
        Self {
            column: None,
            ..Self::new(NodeId::NONE, 0, board, 0)
        }
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Originating column; `None` only for the root.
    #[inline]
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    pub fn pending(&self) -> &[NodeId] {
        &self.pending
    }

    #[must_use]
    pub fn explored(&self) -> &[NodeId] {
        &self.explored
    }

    /// No pending children remain.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.pending.is_empty()
    }

    /// No child has been sampled yet. A decided board stays a tree leaf
    /// forever.
    #[must_use]
    pub fn is_tree_leaf(&self) -> bool {
        self.explored.is_empty()
    }

    /// The board at this node is won, lost or drawn.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.board.outcome().is_decided()
    }

    #[inline]
    #[must_use]
    pub fn simulation_count(&self) -> u32 {
        self.simulations
    }

    #[inline]
    #[must_use]
    pub fn win_count(&self, player: Player) -> u32 {
        self.wins[player]
    }

    #[inline]
    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.draws
    }

    /// Fraction of simulations won by `player` (0 when unvisited).
    #[must_use]
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            f64::from(self.wins[player]) / f64::from(self.simulations)
        }
    }

    pub(crate) fn push_pending(&mut self, child: NodeId) {
        self.pending.push(child);
    }

    /// Move the pending child at `index` to the end of `explored`.
    pub(crate) fn promote_pending(&mut self, index: usize) -> NodeId {
        let child = self.pending.remove(index);
        self.explored.push(child);
        child
    }

    /// Count one finished rollout. Only backpropagation calls this.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.simulations += 1;
        match outcome.winner() {
            Some(player) => self.wins[player] += 1,
            None => {
                if outcome == Outcome::Draw {
                    self.draws += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardState {
        BoardState::new(7, 6, Player::A)
    }

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let node = MCTSNode::root(board());

        assert!(node.is_root());
        assert!(node.parent().is_none());
        assert_eq!(node.column(), None);
        assert_eq!(node.depth(), 0);
        assert_eq!(node.simulation_count(), 0);
        assert!(node.is_tree_leaf());
        assert!(node.is_fully_expanded());
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_node_expansion_state() {
        let mut node = MCTSNode::root(board());
        node.push_pending(NodeId::new(1));
        node.push_pending(NodeId::new(2));
        node.push_pending(NodeId::new(3));

        assert!(!node.is_fully_expanded());
        assert!(node.is_tree_leaf());

        let promoted = node.promote_pending(1);
        assert_eq!(promoted, NodeId::new(2));
        assert_eq!(node.pending(), &[NodeId::new(1), NodeId::new(3)]);
        assert_eq!(node.explored(), &[NodeId::new(2)]);
        assert!(!node.is_tree_leaf());

        node.promote_pending(0);
        node.promote_pending(0);
        assert!(node.is_fully_expanded());
        assert_eq!(node.explored(), &[NodeId::new(2), NodeId::new(1), NodeId::new(3)]);
    }

    #[test]
    fn test_record_counts_one_outcome() {
        let mut node = MCTSNode::new(NodeId::new(0), 3, board(), 1);

        node.record(Outcome::AWon);
        node.record(Outcome::AWon);
        node.record(Outcome::BWon);
        node.record(Outcome::Draw);

        assert_eq!(node.simulation_count(), 4);
        assert_eq!(node.win_count(Player::A), 2);
        assert_eq!(node.win_count(Player::B), 1);
        assert_eq!(node.draw_count(), 1);
        assert_eq!(node.win_rate(Player::A), 0.5);
        assert_eq!(node.column(), Some(3));
    }

    #[test]
    fn test_win_rate_unvisited() {
        let node = MCTSNode::root(board());
        assert_eq!(node.win_rate(Player::A), 0.0);
    }

    #[test]
    fn test_serialization() {
        let mut node = MCTSNode::new(NodeId::new(0), 4, board(), 1);
        node.record(Outcome::BWon);

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: MCTSNode = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.column(), Some(4));
        assert_eq!(deserialized.simulation_count(), 1);
        assert_eq!(deserialized.win_count(Player::B), 1);
    }
}
