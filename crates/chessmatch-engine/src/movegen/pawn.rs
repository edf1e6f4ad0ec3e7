//! Pawn pushes and captures.

use crate::{Board, MoveGrid};
use chessmatch_core::{Color, Position};

/// Pushes and diagonal captures. En passant is not generated here.
pub(super) fn pawn_moves(board: &Board, from: Position, color: Color, move_count: u32) -> MoveGrid {
    let mut grid = MoveGrid::EMPTY;
    let direction = color.pawn_direction();

    let single = from.offset(direction, 0);
    if board.is_vacant(single) {
        grid.set(single);
        let double = from.offset(2 * direction, 0);
        if move_count == 0 && board.is_vacant(double) {
            grid.set(double);
        }
    }

    for side in [-1, 1] {
        let diagonal = from.offset(direction, side);
        if board.is_opponent_piece(diagonal, color) {
            grid.set(diagonal);
        }
    }

    grid
}

/// Both forward diagonals, occupied or not.
pub(super) fn pawn_attacks(from: Position, color: Color) -> MoveGrid {
    let direction = color.pawn_direction();
    [from.offset(direction, -1), from.offset(direction, 1)]
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmatch_core::PieceKind;

    #[test]
    fn unmoved_pawn_may_advance_two() {
        let mut board = Board::new();
        let from = Position::new(6, 4);
        let pawn = board.spawn(PieceKind::Pawn, Color::White);
        board.place_piece(pawn, from).unwrap();

        let grid = pawn_moves(&board, from, Color::White, 0);
        assert_eq!(grid.count(), 2);
        assert!(grid.contains(Position::new(5, 4)));
        assert!(grid.contains(Position::new(4, 4)));

        let grid = pawn_moves(&board, from, Color::White, 1);
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut board = Board::new();
        let from = Position::new(1, 2);
        let pawn = board.spawn(PieceKind::Pawn, Color::Black);
        board.place_piece(pawn, from).unwrap();
        let blocker = board.spawn(PieceKind::Knight, Color::White);
        board.place_piece(blocker, Position::new(2, 2)).unwrap();

        assert!(pawn_moves(&board, from, Color::Black, 0).is_empty());
    }

    #[test]
    fn double_step_needs_both_squares_empty() {
        let mut board = Board::new();
        let from = Position::new(1, 2);
        let pawn = board.spawn(PieceKind::Pawn, Color::Black);
        board.place_piece(pawn, from).unwrap();
        let blocker = board.spawn(PieceKind::Knight, Color::White);
        board.place_piece(blocker, Position::new(3, 2)).unwrap();

        let grid = pawn_moves(&board, from, Color::Black, 0);
        assert_eq!(grid.count(), 1);
        assert!(grid.contains(Position::new(2, 2)));
    }

    #[test]
    fn captures_only_opponents_diagonally() {
        let mut board = Board::new();
        let from = Position::new(4, 0);
        let pawn = board.spawn(PieceKind::Pawn, Color::White);
        board.place_piece(pawn, from).unwrap();
        let enemy = board.spawn(PieceKind::Rook, Color::Black);
        board.place_piece(enemy, Position::new(3, 1)).unwrap();
        let front = board.spawn(PieceKind::Rook, Color::Black);
        board.place_piece(front, Position::new(3, 0)).unwrap();

        let grid = pawn_moves(&board, from, Color::White, 1);
        assert_eq!(grid.count(), 1);
        assert!(grid.contains(Position::new(3, 1)));
    }

    #[test]
    fn attacks_ignore_occupancy_and_clip_to_board() {
        let grid = pawn_attacks(Position::new(1, 0), Color::Black);
        assert_eq!(grid.count(), 1);
        assert!(grid.contains(Position::new(2, 1)));

        let grid = pawn_attacks(Position::new(6, 4), Color::White);
        assert!(grid.contains(Position::new(5, 3)));
        assert!(grid.contains(Position::new(5, 5)));
    }
}
