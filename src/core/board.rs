//! Connect Four grid rules.
//!
//! ## Layout
//!
//! Cells are stored column-major with row 0 at the bottom:
//!
//! ```text
//! row 5 | . . . . . . . |
//! row 4 | . . . . . . . |
//!  ...
//! row 0 | . . . . . . . |
//!         0 1 2 3 4 5 6   <- column index
//! ```
//!
//! Markers fall to the lowest empty row of a column, so the occupied cells
//! of every column are contiguous from the bottom. A column is full iff its
//! topmost cell is occupied.
//!
//! The outcome is never stored; `outcome()` re-derives it from the grid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Cell, Player};
use crate::rules::outcome::{self, Outcome};

/// Errors raised by board construction and move application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range for a board of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("malformed grid: {0}")]
    MalformedGrid(String),
}

/// A Connect Four position: grid contents plus the player to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    width: usize,
    height: usize,
    /// Column-major cells, `cells[col * height + row]`.
    cells: Vec<Cell>,
    mover: Player,
}

impl BoardState {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, mover: Player) -> Self {
        assert!(width > 0, "Board must have at least 1 column");
        assert!(height > 0, "Board must have at least 1 row");

        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            mover,
        }
    }

    /// Build a board from a column-major grid (`grid[column][row]`, row 0
    /// at the bottom), copying every cell.
    ///
    /// Rejects grids with no columns, columns of differing or zero length,
    /// and markers floating above an empty cell.
    pub fn from_grid<C: AsRef<[Cell]>>(grid: &[C], mover: Player) -> Result<Self, BoardError> {
        let width = grid.len();
        if width == 0 {
            return Err(BoardError::MalformedGrid("grid has no columns".into()));
        }

        let height = grid[0].as_ref().len();
        if height == 0 {
            return Err(BoardError::MalformedGrid("grid has no rows".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (col, column) in grid.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != height {
                return Err(BoardError::MalformedGrid(format!(
                    "column {} has {} rows, expected {}",
                    col,
                    column.len(),
                    height
                )));
            }

            // Gravity: once an empty cell is seen, everything above is empty.
            if let Some(gap) = column.iter().position(|c| c.is_empty()) {
                if let Some(offset) = column[gap..].iter().position(|c| !c.is_empty()) {
                    return Err(BoardError::MalformedGrid(format!(
                        "column {} has a floating marker at row {}",
                        col,
                        gap + offset
                    )));
                }
            }

            cells.extend_from_slice(column);
        }

        Ok(Self {
            width,
            height,
            cells,
            mover,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The player who places the next marker.
    #[inline]
    #[must_use]
    pub fn mover(&self) -> Player {
        self.mover
    }

    /// Contents of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid.
    #[inline]
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        assert!(column < self.width && row < self.height, "cell ({column}, {row}) outside grid");
        self.cells[self.index(column, row)]
    }

    #[inline]
    fn index(&self, column: usize, row: usize) -> usize {
        column * self.height + row
    }

    fn column_cells(&self, column: usize) -> &[Cell] {
        let start = column * self.height;
        &self.cells[start..start + self.height]
    }

    /// Number of markers in a column (0 for out-of-range columns).
    #[must_use]
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.width {
            return 0;
        }
        self.column_cells(column)
            .iter()
            .take_while(|c| !c.is_empty())
            .count()
    }

    /// True if no marker can be dropped into `column`.
    ///
    /// Columns outside the grid count as full.
    #[must_use]
    pub fn is_column_full(&self, column: usize) -> bool {
        if column >= self.width {
            return true;
        }
        !self.cell(column, self.height - 1).is_empty()
    }

    /// True if every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|col| self.is_column_full(col))
    }

    /// Total markers on the board.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Playable columns in ascending order.
    ///
    /// Empty once the game is decided, even if some columns have room.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.outcome().is_decided() {
            return Vec::new();
        }
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop the mover's marker into the lowest empty row of `column`.
    ///
    /// Does not switch the mover. On error the board is unchanged.
    pub fn apply_move(&mut self, column: usize) -> Result<(), BoardError> {
        if column >= self.width {
            return Err(BoardError::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        if self.is_column_full(column) {
            return Err(BoardError::ColumnFull { column });
        }

        let row = self.column_height(column);
        let idx = self.index(column, row);
        self.cells[idx] = self.mover.into();
        Ok(())
    }

    /// Hand the turn to the other player.
    pub fn switch_mover(&mut self) {
        self.mover = self.mover.other();
    }

    /// Current outcome, derived from the grid.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        outcome::evaluate(self)
    }
}
