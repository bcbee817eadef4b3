//! Game outcome and four-in-a-row detection.

use serde::{Deserialize, Serialize};

use crate::core::board::BoardState;
use crate::core::player::{Cell, Player};

/// Number of aligned markers needed to win.
pub const CONNECT: usize = 4;

/// Line orientations as (column step, row step).
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // vertical
    (1, 0),  // horizontal
    (1, 1),  // diagonal up-right
    (1, -1), // diagonal down-right
];

/// State of a game, derived from the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Neither side has connected four and empty cells remain.
    InProgress,
    /// Player A connected four.
    AWon,
    /// Player B connected four.
    BWon,
    /// The grid is full with no four-in-a-row.
    Draw,
}

impl Outcome {
    /// The winning player, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::AWon => Some(Player::A),
            Outcome::BWon => Some(Player::B),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// Outcome for a win by `player`.
    #[must_use]
    pub const fn won_by(player: Player) -> Self {
        match player {
            Player::A => Outcome::AWon,
            Player::B => Outcome::BWon,
        }
    }

    /// True once the game can no longer continue.
    #[inline]
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::AWon => write!(f, "A won"),
            Outcome::BWon => write!(f, "B won"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Evaluate a board. A is checked before B.
pub fn evaluate(board: &BoardState) -> Outcome {
    for player in Player::ALL {
        if has_connect_four(board, player.marker()) {
            return Outcome::won_by(player);
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Slide a window of `CONNECT` cells along every orientation looking for
/// a run of `marker`.
pub fn has_connect_four(board: &BoardState, marker: Cell) -> bool {
    if marker.is_empty() {
        return false;
    }

    let width = board.width() as isize;
    let height = board.height() as isize;
    let span = CONNECT as isize - 1;

    for (dc, dr) in DIRECTIONS {
        for col in 0..width {
            let end_col = col + dc * span;
            if end_col < 0 || end_col >= width {
                continue;
            }
            for row in 0..height {
                let end_row = row + dr * span;
                if end_row < 0 || end_row >= height {
                    continue;
                }

                let aligned = (0..CONNECT as isize).all(|i| {
                    board.cell((col + dc * i) as usize, (row + dr * i) as usize) == marker
                });
                if aligned {
                    return true;
                }
            }
        }
    }

    false
}
