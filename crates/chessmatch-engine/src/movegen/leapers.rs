//! Fixed-offset movement for knights and kings.

use crate::{Board, MoveGrid};
use chessmatch_core::{Color, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn leap(board: &Board, from: Position, color: Color, offsets: &[(i8, i8)]) -> MoveGrid {
    offsets
        .iter()
        .map(|&(rows, columns)| from.offset(rows, columns))
        .filter(|&p| board.can_move_to(p, color))
        .collect()
}

pub(super) fn knight_moves(board: &Board, from: Position, color: Color) -> MoveGrid {
    leap(board, from, color, &KNIGHT_OFFSETS)
}

/// Adjacent squares only; castling is added by [`super::castling_moves`].
pub(super) fn king_moves(board: &Board, from: Position, color: Color) -> MoveGrid {
    leap(board, from, color, &KING_OFFSETS)
}
