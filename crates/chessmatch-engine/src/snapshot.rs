//! Serializable views of a match.

use chessmatch_core::{ChessPiece, ChessPosition, Color, COLUMNS, ROWS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a match stands between two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// No piece has been placed yet.
    NotStarted,
    InProgress,
    /// The player to move is in check.
    Check,
    /// A pawn reached the last rank and waits for its replacement.
    AwaitingPromotion,
    Checkmate,
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchState::NotStarted => "not started",
            MatchState::InProgress => "in progress",
            MatchState::Check => "check",
            MatchState::AwaitingPromotion => "awaiting promotion",
            MatchState::Checkmate => "checkmate",
        };
        write!(f, "{}", s)
    }
}

/// Owned copy of everything a front end needs to draw a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub turn: u32,
    pub current_player: Color,
    pub state: MatchState,
    pub check: bool,
    pub checkmate: bool,
    /// Row 0 is rank 8, column 0 is file a.
    pub board: [[Option<ChessPiece>; COLUMNS as usize]; ROWS as usize],
    pub captured: Vec<ChessPiece>,
    pub en_passant_vulnerable: Option<ChessPosition>,
    pub promoted: Option<ChessPosition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChessMatch;

    #[test]
    fn state_display() {
        assert_eq!(MatchState::AwaitingPromotion.to_string(), "awaiting promotion");
        assert_eq!(MatchState::Checkmate.to_string(), "checkmate");
    }

    #[test]
    fn snapshot_json_round_trip() {
        let snapshot = ChessMatch::new().snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"state\":\"InProgress\""));
        assert!(json.contains("\"current_player\":\"White\""));

        let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
