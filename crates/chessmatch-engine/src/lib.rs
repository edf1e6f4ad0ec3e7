//! Rules engine for a two-player chess match.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of handles into an arena of [`Piece`]s
//! - [`MoveGrid`] - 64-bit set of reachable squares
//! - [`movegen`] - movement patterns per piece kind, castling and en passant
//! - [`ChessMatch`] - turn handling, move validation, check and checkmate
//! - [`MatchSnapshot`] - serializable view of a match for front ends
//!
//! # Example
//!
//! ```
//! use chessmatch_engine::{ChessMatch, MatchState};
//!
//! let mut chess_match = ChessMatch::new();
//! let moves = chess_match.possible_moves("g1".parse().unwrap()).unwrap();
//! assert_eq!(moves.count(), 2);
//!
//! chess_match
//!     .perform_move("e2".parse().unwrap(), "e4".parse().unwrap())
//!     .unwrap();
//! assert_eq!(chess_match.turn(), 2);
//! assert_eq!(chess_match.state(), MatchState::InProgress);
//! ```

mod board;
mod chess_match;
mod grid;
pub mod movegen;
mod snapshot;

pub use board::{Board, BoardError, Piece, PieceId};
pub use chess_match::{ChessError, ChessMatch, MoveRejection};
pub use grid::MoveGrid;
pub use snapshot::{MatchSnapshot, MatchState};
