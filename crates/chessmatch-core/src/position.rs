//! Matrix coordinates used internally by the board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows on the board.
pub const ROWS: i8 = 8;

/// Number of columns on the board.
pub const COLUMNS: i8 = 8;

/// A 0-indexed row/column pair.
///
/// Row 0 is rank 8 and column 0 is file `a`. A position may point outside the
/// board; the board decides whether it exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    #[inline]
    pub const fn new(row: i8, column: i8) -> Self {
        Position { row, column }
    }

    /// Returns this position shifted by the given row and column deltas.
    #[inline]
    pub const fn offset(self, rows: i8, columns: i8) -> Self {
        Position {
            row: self.row + rows,
            column: self.column + columns,
        }
    }

    /// Returns true if the position lies on an 8x8 board.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < ROWS && self.column >= 0 && self.column < COLUMNS
    }

    /// Returns the cell index (`row * 8 + column`), or `None` off the board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some((self.row as usize) * (COLUMNS as usize) + self.column as usize)
        } else {
            None
        }
    }

    /// Creates a position from a cell index (0-63).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < (ROWS as usize) * (COLUMNS as usize) {
            Some(Position {
                row: (index / COLUMNS as usize) as i8,
                column: (index % COLUMNS as usize) as i8,
            })
        } else {
            None
        }
    }

    /// Iterates over every on-board position, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLUMNS).map(move |column| Position::new(row, column)))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {})", self.row, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.row, self.column)
    }
}
