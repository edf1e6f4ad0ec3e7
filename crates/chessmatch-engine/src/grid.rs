//! Move grid representation.
//!
//! A move grid is the 8x8 boolean matrix of squares a piece can reach. It is
//! stored as a 64-bit integer where bit `row * 8 + column` marks one cell, so
//! that grids are cheap to copy, merge and compare.

use chessmatch_core::{Position, COLUMNS, ROWS};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// An 8x8 grid of reachable squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveGrid(u64);

impl MoveGrid {
    /// Grid with no square marked.
    pub const EMPTY: MoveGrid = MoveGrid(0);

    /// Returns true if no square is marked.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of marked squares.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given position is marked. Off-board positions never are.
    #[inline]
    pub const fn contains(self, position: Position) -> bool {
        match position.index() {
            Some(index) => (self.0 & (1u64 << index)) != 0,
            None => false,
        }
    }

    /// Marks the given position. Off-board positions are ignored.
    #[inline]
    pub fn set(&mut self, position: Position) {
        if let Some(index) = position.index() {
            self.0 |= 1u64 << index;
        }
    }

    /// Pops and returns the marked position with the lowest cell index.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Position> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros() as usize;
            self.0 &= self.0 - 1;
            Position::from_index(index)
        }
    }

    /// Expands the grid into a row-major boolean matrix.
    pub fn to_matrix(self) -> [[bool; COLUMNS as usize]; ROWS as usize] {
        let mut matrix = [[false; COLUMNS as usize]; ROWS as usize];
        for position in self {
            matrix[position.row as usize][position.column as usize] = true;
        }
        matrix
    }
}

impl BitOr for MoveGrid {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        MoveGrid(self.0 | rhs.0)
    }
}

impl BitOrAssign for MoveGrid {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for MoveGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MoveGrid({:#018x})", self.0)?;
        for row in 0..ROWS {
            write!(f, "{} ", ROWS - row)?;
            for column in 0..COLUMNS {
                if self.contains(Position::new(row, column)) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over marked positions in a grid.
pub struct MoveGridIter(MoveGrid);

impl Iterator for MoveGridIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for MoveGrid {
    type Item = Position;
    type IntoIter = MoveGridIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        MoveGridIter(self)
    }
}

impl FromIterator<Position> for MoveGrid {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut grid = MoveGrid::EMPTY;
        for position in iter {
            grid.set(position);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_contains() {
        let mut grid = MoveGrid::EMPTY;
        assert!(grid.is_empty());
        grid.set(Position::new(0, 0));
        grid.set(Position::new(7, 7));
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(7, 7)));
        assert!(!grid.contains(Position::new(3, 3)));
        assert_eq!(grid.count(), 2);
    }

    #[test]
    fn off_board_is_ignored() {
        let mut grid = MoveGrid::EMPTY;
        grid.set(Position::new(-1, 3));
        grid.set(Position::new(2, 8));
        assert!(grid.is_empty());
        assert!(!grid.contains(Position::new(8, 8)));
    }

    #[test]
    fn iterates_row_major() {
        let grid: MoveGrid = [Position::new(5, 1), Position::new(2, 6), Position::new(2, 3)]
            .into_iter()
            .collect();
        let positions: Vec<Position> = grid.into_iter().collect();
        assert_eq!(
            positions,
            vec![Position::new(2, 3), Position::new(2, 6), Position::new(5, 1)]
        );
    }

    #[test]
    fn matrix_matches_marked_cells() {
        let mut grid = MoveGrid::EMPTY;
        grid.set(Position::new(4, 4));
        let matrix = grid.to_matrix();
        assert!(matrix[4][4]);
        assert_eq!(matrix.iter().flatten().filter(|&&b| b).count(), 1);
    }

    #[test]
    fn union() {
        let a: MoveGrid = [Position::new(0, 0)].into_iter().collect();
        let mut b: MoveGrid = [Position::new(0, 1)].into_iter().collect();
        let both = a | b;
        assert!(both.contains(Position::new(0, 0)));
        assert!(both.contains(Position::new(0, 1)));
        b |= a;
        assert_eq!(b, both);
    }
}
