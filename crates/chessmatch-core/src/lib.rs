//! Core types for a two-player chess match.
//!
//! This crate provides the value types shared by the rules engine and its
//! front ends:
//! - [`Color`] and [`PieceKind`] / [`ChessPiece`] for piece representation
//! - [`Position`] for 0-indexed board matrix coordinates
//! - [`ChessPosition`], [`File`] and [`Rank`] for algebraic coordinates

mod chess_position;
mod color;
mod piece;
mod position;

pub use chess_position::{ChessPosition, File, PositionError, Rank};
pub use color::Color;
pub use piece::{ChessPiece, PieceKind};
pub use position::{Position, COLUMNS, ROWS};
