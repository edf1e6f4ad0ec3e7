//! Ray-cast movement for bishops, rooks and queens.

use crate::{Board, MoveGrid};
use chessmatch_core::{Color, Position};

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Walks each direction until the first occupied square, which is included
/// only when it holds an opposing piece.
fn ray_cast(board: &Board, from: Position, color: Color, directions: &[(i8, i8)]) -> MoveGrid {
    let mut grid = MoveGrid::EMPTY;
    for &(rows, columns) in directions {
        let mut p = from.offset(rows, columns);
        while board.is_vacant(p) {
            grid.set(p);
            p = p.offset(rows, columns);
        }
        if board.is_opponent_piece(p, color) {
            grid.set(p);
        }
    }
    grid
}

pub(super) fn bishop_moves(board: &Board, from: Position, color: Color) -> MoveGrid {
    ray_cast(board, from, color, &DIAGONALS)
}

pub(super) fn rook_moves(board: &Board, from: Position, color: Color) -> MoveGrid {
    ray_cast(board, from, color, &ORTHOGONALS)
}

pub(super) fn queen_moves(board: &Board, from: Position, color: Color) -> MoveGrid {
    bishop_moves(board, from, color) | rook_moves(board, from, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmatch_core::PieceKind;

    fn board_with(pieces: &[(PieceKind, Color, Position)]) -> Board {
        let mut board = Board::new();
        for &(kind, color, at) in pieces {
            let id = board.spawn(kind, color);
            board.place_piece(id, at).unwrap();
        }
        board
    }

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        let from = Position::new(4, 3);
        let board = board_with(&[(PieceKind::Rook, Color::White, from)]);
        let grid = rook_moves(&board, from, Color::White);
        assert_eq!(grid.count(), 14);
        assert!(!grid.contains(from));
    }

    #[test]
    fn ray_stops_at_first_piece() {
        let from = Position::new(7, 0);
        let friend = Position::new(4, 0);
        let enemy = Position::new(7, 5);
        let board = board_with(&[
            (PieceKind::Rook, Color::White, from),
            (PieceKind::Pawn, Color::White, friend),
            (PieceKind::Knight, Color::Black, enemy),
        ]);
        let grid = rook_moves(&board, from, Color::White);

        // Up the file: rows 6 and 5, blocked by the friendly pawn.
        assert!(grid.contains(Position::new(6, 0)));
        assert!(grid.contains(Position::new(5, 0)));
        assert!(!grid.contains(friend));
        assert!(!grid.contains(Position::new(3, 0)));

        // Along the rank: up to and including the enemy knight.
        assert!(grid.contains(Position::new(7, 4)));
        assert!(grid.contains(enemy));
        assert!(!grid.contains(Position::new(7, 6)));
        assert_eq!(grid.count(), 7);
    }

    #[test]
    fn bishop_stays_on_diagonals() {
        let from = Position::new(7, 2);
        let board = board_with(&[(PieceKind::Bishop, Color::Black, from)]);
        let grid = bishop_moves(&board, from, Color::Black);
        assert_eq!(grid.count(), 7);
        assert!(grid.contains(Position::new(6, 1)));
        assert!(grid.contains(Position::new(5, 0)));
        assert!(grid.contains(Position::new(2, 7)));
        assert!(!grid.contains(Position::new(6, 2)));
    }

    #[test]
    fn queen_is_union_of_bishop_and_rook() {
        let from = Position::new(3, 3);
        let board = board_with(&[
            (PieceKind::Queen, Color::White, from),
            (PieceKind::Pawn, Color::Black, Position::new(1, 1)),
            (PieceKind::Pawn, Color::White, Position::new(3, 6)),
        ]);
        let queen = queen_moves(&board, from, Color::White);
        let union = bishop_moves(&board, from, Color::White) | rook_moves(&board, from, Color::White);
        assert_eq!(queen, union);
        assert!(queen.contains(Position::new(1, 1)));
        assert!(!queen.contains(Position::new(0, 0)));
        assert!(!queen.contains(Position::new(3, 6)));
    }
}
