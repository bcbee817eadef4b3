//! The two movers, grid cell values, and per-player storage.
//!
//! ## Player
//!
//! Connect Four has exactly two sides. `Player::A` conventionally moves
//! first, but any board may be created with either side to move.
//!
//! ## PerPlayer
//!
//! Fixed two-slot storage indexed by `Player`, used for win counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First side (red in the classic game).
    A,
    /// Second side (yellow in the classic game).
    B,
}

impl Player {
    /// Both players, A first.
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    /// The opposing player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// 0-based index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// The marker this player drops into the grid.
    #[must_use]
    pub const fn marker(self) -> Cell {
        match self {
            Player::A => Cell::A,
            Player::B => Cell::B,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::A => write!(f, "Player A"),
            Player::B => write!(f, "Player B"),
        }
    }
}

/// Contents of a single grid slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    A,
    B,
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.marker()
    }
}

/// Per-player data with O(1) access.
///
/// ```
/// use connect_four_mcts::core::{PerPlayer, Player};
///
/// let mut wins: PerPlayer<u32> = PerPlayer::default();
/// wins[Player::B] += 3;
/// assert_eq!(wins[Player::A], 0);
/// assert_eq!(wins[Player::B], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    data: [T; 2],
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_other() {
        assert_eq!(Player::A.other(), Player::B);
        assert_eq!(Player::B.other(), Player::A);
        assert_eq!(Player::A.other().other(), Player::A);
    }

    #[test]
    fn test_player_index_and_display() {
        assert_eq!(Player::A.index(), 0);
        assert_eq!(Player::B.index(), 1);
        assert_eq!(format!("{}", Player::B), "Player B");
    }

    #[test]
    fn test_cell_from_player() {
        assert_eq!(Cell::from(Player::A), Cell::A);
        assert_eq!(Cell::from(Player::B), Cell::B);
        assert!(Cell::default().is_empty());
    }

    #[test]
    fn test_per_player_mutation() {
        let mut map: PerPlayer<u32> = PerPlayer::default();
        map[Player::A] += 11;
        map[Player::B] += 2;

        assert_eq!(map[Player::A], 11);
        assert_eq!(map[Player::B], 2);
    }

    #[test]
    fn test_per_player_serialization() {
        let mut map: PerPlayer<u32> = PerPlayer::default();
        map[Player::B] = 7;
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PerPlayer<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
