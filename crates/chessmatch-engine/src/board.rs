//! Board representation.
//!
//! The [`Board`] is an arena: it owns every piece created during a match and
//! its 8x8 grid holds [`PieceId`] handles into that arena. It knows nothing
//! about chess rules beyond bounds and occupancy.

use chessmatch_core::{ChessPiece, ChessPosition, Color, PieceKind, Position, COLUMNS, ROWS};
use thiserror::Error;

/// Errors raised by raw board operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({0}) is not on the board")]
    OutOfBounds(Position),

    #[error("there is already a piece on position ({0})")]
    OccupiedSquare(Position),
}

/// Handle to a piece stored in a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(usize);

/// A piece owned by the board arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    position: Option<Position>,
    move_count: u32,
}

impl Piece {
    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Current position, or `None` while the piece is off the board.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Current position in algebraic coordinates.
    pub fn chess_position(&self) -> Option<ChessPosition> {
        self.position.and_then(|p| ChessPosition::from_position(p).ok())
    }

    /// How many times this piece has moved.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn as_chess_piece(&self) -> ChessPiece {
        ChessPiece::new(self.kind, self.color)
    }

    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }

    pub(crate) fn decrease_move_count(&mut self) {
        debug_assert!(self.move_count > 0);
        self.move_count = self.move_count.saturating_sub(1);
    }
}

/// An 8x8 grid of optional occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    cells: [[Option<PieceId>; COLUMNS as usize]; ROWS as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Board {
            pieces: Vec::new(),
            cells: [[None; COLUMNS as usize]; ROWS as usize],
        }
    }

    /// Creates a board holding the pieces of `layout`, row 0 being rank 8.
    ///
    /// Pieces enter the arena row by row, left to right.
    pub fn from_layout(layout: &[[Option<ChessPiece>; COLUMNS as usize]; ROWS as usize]) -> Self {
        let mut board = Board::new();
        for (row, cells) in layout.iter().enumerate() {
            for (column, piece) in cells.iter().enumerate() {
                if let Some(piece) = piece {
                    let id = board.spawn(piece.kind, piece.color);
                    board.cells[row][column] = Some(id);
                    board.get_mut(id).position = Some(Position::new(row as i8, column as i8));
                }
            }
        }
        board
    }

    /// Creates a new piece in the arena. It is not on the board until placed.
    pub fn spawn(&mut self, kind: PieceKind, color: Color) -> PieceId {
        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece {
            id,
            kind,
            color,
            position: None,
            move_count: 0,
        });
        id
    }

    /// Returns the piece behind a handle.
    ///
    /// Handles are only minted by [`Board::spawn`], so every handle obtained
    /// from this board is valid for its lifetime.
    ///
    /// # Panics
    ///
    /// Panics if `id` was minted by a different board that holds more pieces.
    #[inline]
    pub fn get(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }

    /// Returns true if the position lies on this board.
    #[inline]
    pub fn position_exists(&self, position: Position) -> bool {
        position.is_on_board()
    }

    /// Returns the handle of the occupant at `position`.
    pub fn piece_id(&self, position: Position) -> Result<Option<PieceId>, BoardError> {
        let (row, column) = self.cell(position)?;
        Ok(self.cells[row][column])
    }

    /// Returns the occupant at `position`.
    pub fn piece(&self, position: Position) -> Result<Option<&Piece>, BoardError> {
        Ok(self.piece_id(position)?.map(|id| self.get(id)))
    }

    /// Returns true if a piece sits at `position`.
    pub fn there_is_a_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece_id(position)?.is_some())
    }

    /// Places a piece on an empty square and records the square on the piece.
    pub fn place_piece(&mut self, id: PieceId, position: Position) -> Result<(), BoardError> {
        let (row, column) = self.cell(position)?;
        if self.cells[row][column].is_some() {
            return Err(BoardError::OccupiedSquare(position));
        }
        self.cells[row][column] = Some(id);
        self.get_mut(id).position = Some(position);
        Ok(())
    }

    /// Detaches and returns the occupant at `position`, clearing its position.
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<PieceId>, BoardError> {
        let (row, column) = self.cell(position)?;
        let removed = self.cells[row][column].take();
        if let Some(id) = removed {
            self.get_mut(id).position = None;
        }
        Ok(removed)
    }

    /// Iterates over the pieces currently on the board, row by row.
    pub fn occupants(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .map(move |&id| self.get(id))
    }

    /// Returns true if `position` is on the board and empty.
    pub(crate) fn is_vacant(&self, position: Position) -> bool {
        matches!(self.piece_id(position), Ok(None))
    }

    /// Returns true if `position` holds a piece of the opposite color.
    pub(crate) fn is_opponent_piece(&self, position: Position, color: Color) -> bool {
        matches!(self.piece(position), Ok(Some(p)) if p.color() != color)
    }

    /// Returns true if a piece of `color` may land on `position`: on the board
    /// and either empty or holding an opposing piece.
    pub(crate) fn can_move_to(&self, position: Position, color: Color) -> bool {
        self.is_vacant(position) || self.is_opponent_piece(position, color)
    }

    fn cell(&self, position: Position) -> Result<(usize, usize), BoardError> {
        if !self.position_exists(position) {
            return Err(BoardError::OutOfBounds(position));
        }
        Ok((position.row as usize, position.column as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_layout_places_every_piece() {
        let mut layout = [[None; COLUMNS as usize]; ROWS as usize];
        layout[0][4] = Some(ChessPiece::new(PieceKind::King, Color::Black));
        layout[7][0] = Some(ChessPiece::new(PieceKind::Rook, Color::White));
        let board = Board::from_layout(&layout);

        let king = board.piece(Position::new(0, 4)).unwrap().unwrap();
        assert_eq!(king.as_chess_piece(), ChessPiece::new(PieceKind::King, Color::Black));
        assert_eq!(king.position(), Some(Position::new(0, 4)));
        assert_eq!(king.move_count(), 0);
        assert!(board.there_is_a_piece(Position::new(7, 0)).unwrap());
        assert_eq!(board.occupants().count(), 2);
    }

    #[test]
    #[should_panic]
    fn handle_from_another_board_panics() {
        let mut other = Board::new();
        let id = other.spawn(PieceKind::King, Color::White);
        Board::new().get(id);
    }

    #[test]
    fn place_and_remove() {
        let mut board = Board::new();
        let rook = board.spawn(PieceKind::Rook, Color::White);
        let at = Position::new(7, 0);
        assert_eq!(board.get(rook).position(), None);

        board.place_piece(rook, at).unwrap();
        assert_eq!(board.get(rook).position(), Some(at));
        assert!(board.there_is_a_piece(at).unwrap());
        assert_eq!(board.piece(at).unwrap().map(Piece::kind), Some(PieceKind::Rook));

        assert_eq!(board.remove_piece(at).unwrap(), Some(rook));
        assert_eq!(board.get(rook).position(), None);
        assert!(!board.there_is_a_piece(at).unwrap());
        assert_eq!(board.remove_piece(at).unwrap(), None);
    }

    #[test]
    fn placing_on_occupied_square_fails() {
        let mut board = Board::new();
        let a = board.spawn(PieceKind::Knight, Color::White);
        let b = board.spawn(PieceKind::Knight, Color::Black);
        let at = Position::new(3, 3);
        board.place_piece(a, at).unwrap();
        assert_eq!(board.place_piece(b, at), Err(BoardError::OccupiedSquare(at)));
        assert_eq!(board.piece_id(at).unwrap(), Some(a));
        assert_eq!(board.get(b).position(), None);
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut board = Board::new();
        let pawn = board.spawn(PieceKind::Pawn, Color::Black);
        let off = Position::new(8, 0);
        assert!(!board.position_exists(off));
        assert_eq!(board.piece(off).err(), Some(BoardError::OutOfBounds(off)));
        assert_eq!(board.place_piece(pawn, off), Err(BoardError::OutOfBounds(off)));
        let left = Position::new(0, -1);
        assert_eq!(board.remove_piece(left), Err(BoardError::OutOfBounds(left)));
    }

    #[test]
    fn occupancy_helpers() {
        let mut board = Board::new();
        let white = board.spawn(PieceKind::Bishop, Color::White);
        let black = board.spawn(PieceKind::Bishop, Color::Black);
        board.place_piece(white, Position::new(4, 4)).unwrap();
        board.place_piece(black, Position::new(3, 3)).unwrap();

        assert!(board.is_vacant(Position::new(0, 0)));
        assert!(!board.is_vacant(Position::new(-1, 0)));
        assert!(board.is_opponent_piece(Position::new(3, 3), Color::White));
        assert!(!board.is_opponent_piece(Position::new(4, 4), Color::White));
        assert!(board.can_move_to(Position::new(3, 3), Color::White));
        assert!(!board.can_move_to(Position::new(4, 4), Color::White));
        assert_eq!(board.occupants().count(), 2);
    }
}
