//! Move generation.
//!
//! Every piece kind has its own movement pattern. The functions here return
//! [`MoveGrid`]s of squares a piece could reach, ignoring whether the move
//! would expose its own king; that filter lives in
//! [`ChessMatch`](crate::ChessMatch).

mod leapers;
mod pawn;
mod sliders;

use crate::{Board, MoveGrid, PieceId};
use chessmatch_core::{Color, PieceKind, Position};

/// Rook column offset from the king and king step for each castling side:
/// kingside rook three columns right, queenside rook four columns left.
const CASTLING_SIDES: [(i8, i8); 2] = [(3, 1), (-4, -1)];

/// Returns the movement pattern of a piece from its current square.
///
/// Castling and en passant are not included; see [`castling_moves`] and
/// [`en_passant_target`]. A piece that is not on the board has no moves.
pub fn possible_moves(board: &Board, id: PieceId) -> MoveGrid {
    let piece = board.get(id);
    let Some(from) = piece.position() else {
        return MoveGrid::EMPTY;
    };
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => pawn::pawn_moves(board, from, color, piece.move_count()),
        PieceKind::Knight => leapers::knight_moves(board, from, color),
        PieceKind::Bishop => sliders::bishop_moves(board, from, color),
        PieceKind::Rook => sliders::rook_moves(board, from, color),
        PieceKind::Queen => sliders::queen_moves(board, from, color),
        PieceKind::King => leapers::king_moves(board, from, color),
    }
}

/// Returns the squares a piece attacks.
///
/// Same as [`possible_moves`] except that pawns attack both forward
/// diagonals whether or not an opposing piece stands there.
pub fn attacks(board: &Board, id: PieceId) -> MoveGrid {
    let piece = board.get(id);
    match (piece.kind(), piece.position()) {
        (PieceKind::Pawn, Some(from)) => pawn::pawn_attacks(from, piece.color()),
        _ => possible_moves(board, id),
    }
}

/// Returns true if any piece of color `by` attacks `position`.
pub fn is_attacked(board: &Board, position: Position, by: Color) -> bool {
    board
        .occupants()
        .filter(|p| p.color() == by)
        .any(|p| attacks(board, p.id()).contains(position))
}

/// Returns the castling destinations available to a king.
///
/// The king lands two columns toward the rook when the king stands on its
/// back row, the king and that rook have never moved, every square between them is empty, the king is not
/// attacked and the square it crosses is not attacked either.
pub fn castling_moves(board: &Board, id: PieceId) -> MoveGrid {
    let mut grid = MoveGrid::EMPTY;
    let king = board.get(id);
    let Some(from) = king.position() else {
        return grid;
    };
    let color = king.color();
    if king.kind() != PieceKind::King || king.move_count() != 0 || from.row != color.back_row() {
        return grid;
    }

    let them = color.opposite();
    if is_attacked(board, from, them) {
        return grid;
    }

    for (rook_offset, step) in CASTLING_SIDES {
        let rook_ready = matches!(
            board.piece(from.offset(0, rook_offset)),
            Ok(Some(rook)) if rook.kind() == PieceKind::Rook
                && rook.color() == color
                && rook.move_count() == 0
        );
        let path_clear = (1..rook_offset.abs()).all(|c| board.is_vacant(from.offset(0, c * step)));

        if rook_ready && path_clear && !is_attacked(board, from.offset(0, step), them) {
            grid.set(from.offset(0, 2 * step));
        }
    }

    grid
}

/// For a king move of exactly two columns, returns where the accompanying
/// rook starts and where it lands.
pub fn castling_rook_squares(king_from: Position, king_to: Position) -> Option<(Position, Position)> {
    if king_from.row != king_to.row {
        return None;
    }
    CASTLING_SIDES
        .into_iter()
        .find(|&(_, step)| king_to.column - king_from.column == 2 * step)
        .map(|(rook_offset, step)| (king_from.offset(0, rook_offset), king_from.offset(0, step)))
}

/// Returns the en passant destination of a pawn, if it stands beside the
/// opposing pawn that just advanced two squares.
pub fn en_passant_target(board: &Board, id: PieceId, vulnerable: Option<PieceId>) -> Option<Position> {
    let pawn = board.get(id);
    let victim = board.get(vulnerable?);
    if pawn.kind() != PieceKind::Pawn
        || victim.kind() != PieceKind::Pawn
        || victim.color() == pawn.color()
    {
        return None;
    }

    let from = pawn.position()?;
    let beside = victim.position()?;
    if beside.row != from.row || (beside.column - from.column).abs() != 1 {
        return None;
    }

    let target = beside.offset(pawn.color().pawn_direction(), 0);
    board.is_vacant(target).then_some(target)
}
