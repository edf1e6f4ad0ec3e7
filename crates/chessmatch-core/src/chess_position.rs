//! Algebraic board coordinates.

use crate::position::{Position, ROWS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building or parsing a [`ChessPosition`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid file '{0}': valid values are from a to h")]
    InvalidFile(char),

    #[error("invalid rank {0}: valid values are from 1 to 8")]
    InvalidRank(u8),

    #[error("invalid chess position '{0}': expected a file letter followed by a rank digit")]
    InvalidFormat(String),

    #[error("position ({0}) is not on the board")]
    OffBoard(Position),
}

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a lower-case letter ('a'-'h').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Self::from_index(c as u8 - b'a'),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from its number as written on the board (1-8).
    #[inline]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=8 => Some(Self::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// Returns the rank number (1-8).
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A square named the way players name it, e.g. `e4`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessPosition {
    pub file: File,
    pub rank: Rank,
}

impl ChessPosition {
    /// Creates a chess position from a file letter and a rank number.
    pub fn new(file: char, rank: u8) -> Result<Self, PositionError> {
        let file = File::from_char(file).ok_or(PositionError::InvalidFile(file))?;
        let rank = Rank::from_number(rank).ok_or(PositionError::InvalidRank(rank))?;
        Ok(ChessPosition { file, rank })
    }

    /// Converts to board matrix coordinates. Rank 8 is row 0.
    #[inline]
    pub const fn to_position(self) -> Position {
        Position::new(ROWS - self.rank.number() as i8, self.file.index() as i8)
    }

    /// Converts board matrix coordinates back to a chess position.
    pub fn from_position(position: Position) -> Result<Self, PositionError> {
        if !position.is_on_board() {
            return Err(PositionError::OffBoard(position));
        }
        let file = File::ALL[position.column as usize];
        let rank = Rank::ALL[(ROWS - 1 - position.row) as usize];
        Ok(ChessPosition { file, rank })
    }
}

impl FromStr for ChessPosition {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                let rank = rank
                    .to_digit(10)
                    .ok_or_else(|| PositionError::InvalidFormat(s.to_string()))?;
                Self::new(file, rank as u8)
            }
            _ => Err(PositionError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessPosition({}{})", self.file, self.rank)
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}
