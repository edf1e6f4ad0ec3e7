//! Match orchestration.
//!
//! The [`ChessMatch`] owns the board and drives a game between two players:
//! - source and target validation
//! - move execution with castling, en passant and promotion side effects
//! - rollback of moves that would expose the mover's own king
//! - check and checkmate detection

use crate::movegen;
use crate::snapshot::{MatchSnapshot, MatchState};
use crate::{Board, BoardError, MoveGrid, PieceId};
use chessmatch_core::{
    ChessPiece, ChessPosition, Color, PieceKind, Position, PositionError, COLUMNS, ROWS,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("there is no piece on source position")]
    NoPieceOnSource,

    #[error("the chosen piece is not yours")]
    NotYourPiece,

    #[error("there are no possible moves for the chosen piece")]
    NoPossibleMoves,

    #[error("the chosen piece can't move to target position")]
    CannotMoveToTarget,

    #[error("you can't put yourself in check")]
    SelfCheck,

    #[error("a pawn is waiting to be promoted")]
    PromotionPending,

    #[error("the match is over")]
    MatchFinished,
}

/// Error type for match operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error("illegal move: {0}")]
    IllegalMove(MoveRejection),

    #[error("invalid type for promotion: '{0}'")]
    InvalidPromotionType(String),

    #[error("there is no piece to be promoted")]
    NoPendingPromotion,

    #[error("there is no {0} king on the board")]
    NoKingOnBoard(Color),
}

impl From<MoveRejection> for ChessError {
    fn from(rejection: MoveRejection) -> Self {
        ChessError::IllegalMove(rejection)
    }
}

/// A piece taken by a move, with enough context to put it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Capture {
    id: PieceId,
    at: Position,
    roster_index: Option<usize>,
}

/// Everything `undo_move` needs to reverse one `make_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MoveRecord {
    piece: PieceId,
    source: Position,
    target: Position,
    capture: Option<Capture>,
    castling_rook: Option<(Position, Position)>,
}

/// A chess match between two players sharing one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    board: Board,
    turn: u32,
    current_player: Color,
    check: bool,
    checkmate: bool,
    en_passant_vulnerable: Option<PieceId>,
    promoted: Option<PieceId>,
    pieces_on_board: Vec<PieceId>,
    captured_pieces: Vec<PieceId>,
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessMatch {
    /// Creates a match with the standard starting position, white to move.
    pub fn new() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut layout = [[None; COLUMNS as usize]; ROWS as usize];
        for color in Color::ALL {
            let back = color.back_row() as usize;
            let front = (color.back_row() + color.pawn_direction()) as usize;
            for (column, kind) in BACK_RANK.into_iter().enumerate() {
                layout[back][column] = Some(ChessPiece::new(kind, color));
                layout[front][column] = Some(ChessPiece::new(PieceKind::Pawn, color));
            }
        }

        let board = Board::from_layout(&layout);
        let pieces_on_board = board.occupants().map(|p| p.id()).collect();
        ChessMatch {
            board,
            pieces_on_board,
            ..Self::empty(Color::White)
        }
    }

    /// Creates a match with an empty board.
    ///
    /// Pieces are added with [`ChessMatch::place_new_piece`]; both kings must
    /// be placed before the first move.
    pub fn empty(current_player: Color) -> Self {
        ChessMatch {
            board: Board::new(),
            turn: 1,
            current_player,
            check: false,
            checkmate: false,
            en_passant_vulnerable: None,
            promoted: None,
            pieces_on_board: Vec::new(),
            captured_pieces: Vec::new(),
        }
    }

    /// Puts a new piece on the board and in the on-board roster.
    pub fn place_new_piece(
        &mut self,
        file: char,
        rank: u8,
        kind: PieceKind,
        color: Color,
    ) -> Result<PieceId, ChessError> {
        let position = ChessPosition::new(file, rank)?.to_position();
        if self.board.there_is_a_piece(position)? {
            return Err(BoardError::OccupiedSquare(position).into());
        }
        let id = self.board.spawn(kind, color);
        self.board.place_piece(id, position)?;
        self.pieces_on_board.push(id);
        Ok(id)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn number, starting at 1 and increasing after every move.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Returns true if the player to move is in check.
    pub fn is_check(&self) -> bool {
        self.check
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Returns the winner once the match has ended in checkmate.
    pub fn winner(&self) -> Option<Color> {
        self.checkmate.then_some(self.current_player)
    }

    /// Square of the pawn that may be captured en passant on this ply.
    pub fn en_passant_vulnerable(&self) -> Option<ChessPosition> {
        self.en_passant_vulnerable
            .and_then(|id| self.board.get(id).chess_position())
    }

    /// Square of the pawn waiting for [`ChessMatch::replace_promoted_piece`].
    pub fn promoted(&self) -> Option<ChessPosition> {
        self.promoted.and_then(|id| self.board.get(id).chess_position())
    }

    pub fn state(&self) -> MatchState {
        if self.pieces_on_board.is_empty() {
            MatchState::NotStarted
        } else if self.checkmate {
            MatchState::Checkmate
        } else if self.promoted.is_some() {
            MatchState::AwaitingPromotion
        } else if self.check {
            MatchState::Check
        } else {
            MatchState::InProgress
        }
    }

    /// Returns the kind and color of every occupant, row 0 being rank 8.
    pub fn pieces(&self) -> [[Option<ChessPiece>; COLUMNS as usize]; ROWS as usize] {
        let mut pieces = [[None; COLUMNS as usize]; ROWS as usize];
        for piece in self.board.occupants() {
            if let Some(p) = piece.position() {
                pieces[p.row as usize][p.column as usize] = Some(piece.as_chess_piece());
            }
        }
        pieces
    }

    /// Returns the occupant of a square.
    pub fn piece_at(&self, position: ChessPosition) -> Option<ChessPiece> {
        self.board
            .piece(position.to_position())
            .ok()
            .flatten()
            .map(|p| p.as_chess_piece())
    }

    /// Pieces still in play, in the order they entered the roster.
    pub fn pieces_on_board(&self) -> Vec<ChessPiece> {
        self.roster(&self.pieces_on_board)
    }

    /// Pieces taken so far, in capture order.
    pub fn captured_pieces(&self) -> Vec<ChessPiece> {
        self.roster(&self.captured_pieces)
    }

    fn roster(&self, ids: &[PieceId]) -> Vec<ChessPiece> {
        ids.iter()
            .map(|&id| self.board.get(id).as_chess_piece())
            .collect()
    }

    /// Returns a serializable view of the whole match.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            turn: self.turn,
            current_player: self.current_player,
            state: self.state(),
            check: self.check,
            checkmate: self.checkmate,
            board: self.pieces(),
            captured: self.captured_pieces(),
            en_passant_vulnerable: self.en_passant_vulnerable(),
            promoted: self.promoted(),
        }
    }

    /// Returns the destinations of the piece on `source`.
    ///
    /// The piece must belong to the current player and have at least one
    /// destination. The grid includes castling and en passant but not the
    /// self-check filter, which [`ChessMatch::perform_move`] applies.
    pub fn possible_moves(&self, source: ChessPosition) -> Result<MoveGrid, ChessError> {
        self.validate_source_position(source.to_position())
    }

    /// Plays a move for the current player and returns the captured piece.
    ///
    /// On error the match is left exactly as it was before the call.
    pub fn perform_move(
        &mut self,
        source: ChessPosition,
        target: ChessPosition,
    ) -> Result<Option<ChessPiece>, ChessError> {
        if self.checkmate {
            return Err(MoveRejection::MatchFinished.into());
        }
        if self.promoted.is_some() {
            return Err(MoveRejection::PromotionPending.into());
        }

        let from = source.to_position();
        let to = target.to_position();
        let candidates = self.validate_source_position(from)?;
        if !candidates.contains(to) {
            debug!(%source, %target, "target not reachable");
            return Err(MoveRejection::CannotMoveToTarget.into());
        }

        let record = self.make_move(from, to)?;
        match self.test_check(self.current_player) {
            Ok(false) => {}
            exposed => {
                self.undo_move(record)?;
                exposed?;
                debug!(%source, %target, "move would expose own king");
                return Err(MoveRejection::SelfCheck.into());
            }
        }

        let captured = record
            .capture
            .map(|c| self.board.get(c.id).as_chess_piece());
        let (kind, color) = {
            let moved = self.board.get(record.piece);
            (moved.kind(), moved.color())
        };
        debug!(%source, %target, piece = %kind, ?captured, "move performed");

        self.en_passant_vulnerable =
            (kind == PieceKind::Pawn && (to.row - from.row).abs() == 2).then_some(record.piece);

        if kind == PieceKind::Pawn && to.row == color.promotion_row() {
            self.promoted = Some(record.piece);
            debug!(square = %target, "awaiting promotion");
            return Ok(captured);
        }

        self.finish_turn()?;
        Ok(captured)
    }

    /// Replaces the pawn awaiting promotion by a piece of the given type code
    /// (`B`, `N`, `R` or `Q`) and completes the suspended turn.
    pub fn replace_promoted_piece(&mut self, code: &str) -> Result<ChessPiece, ChessError> {
        let pawn = self.promoted.ok_or(ChessError::NoPendingPromotion)?;
        let kind = PieceKind::from_promotion_code(code)
            .ok_or_else(|| ChessError::InvalidPromotionType(code.to_string()))?;
        let color = self.board.get(pawn).color();
        let at = self
            .board
            .get(pawn)
            .position()
            .ok_or(ChessError::NoPendingPromotion)?;

        self.board.remove_piece(at)?;
        self.pieces_on_board.retain(|&id| id != pawn);
        let replacement = self.board.spawn(kind, color);
        self.board.place_piece(replacement, at)?;
        self.pieces_on_board.push(replacement);
        self.promoted = None;
        debug!(%kind, %color, "pawn promoted");

        self.finish_turn()?;
        Ok(ChessPiece::new(kind, color))
    }

    /// Returns true if the king of `color` is attacked by any opposing piece.
    pub fn test_check(&self, color: Color) -> Result<bool, ChessError> {
        let king = self.king(color)?;
        let at = self
            .board
            .get(king)
            .position()
            .ok_or(ChessError::NoKingOnBoard(color))?;

        Ok(self
            .pieces_on_board
            .iter()
            .filter(|&&id| self.board.get(id).color() != color)
            .any(|&id| movegen::possible_moves(&self.board, id).contains(at)))
    }

    /// Returns true if no move of any piece of `color` gets it out of check.
    ///
    /// Every candidate is tried on the real board and undone before the next.
    pub fn test_checkmate(&mut self, color: Color) -> Result<bool, ChessError> {
        if !self.test_check(color)? {
            return Ok(false);
        }

        let defenders: Vec<PieceId> = self
            .pieces_on_board
            .iter()
            .copied()
            .filter(|&id| self.board.get(id).color() == color)
            .collect();

        for id in defenders {
            let Some(source) = self.board.get(id).position() else {
                continue;
            };
            for target in self.candidate_moves(id) {
                let record = self.make_move(source, target)?;
                let still_in_check = self.test_check(color);
                self.undo_move(record)?;
                if !still_in_check? {
                    trace!(%source, %target, "escape from check found");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn validate_source_position(&self, source: Position) -> Result<MoveGrid, ChessError> {
        let piece = self
            .board
            .piece(source)?
            .ok_or(MoveRejection::NoPieceOnSource)?;
        if piece.color() != self.current_player {
            return Err(MoveRejection::NotYourPiece.into());
        }
        let candidates = self.candidate_moves(piece.id());
        if candidates.is_empty() {
            return Err(MoveRejection::NoPossibleMoves.into());
        }
        Ok(candidates)
    }

    /// Movement pattern plus the special moves that depend on match state.
    fn candidate_moves(&self, id: PieceId) -> MoveGrid {
        let mut grid = movegen::possible_moves(&self.board, id);
        match self.board.get(id).kind() {
            PieceKind::King => grid |= movegen::castling_moves(&self.board, id),
            PieceKind::Pawn => {
                if let Some(target) =
                    movegen::en_passant_target(&self.board, id, self.en_passant_vulnerable)
                {
                    grid.set(target);
                }
            }
            _ => {}
        }
        grid
    }

    fn king(&self, color: Color) -> Result<PieceId, ChessError> {
        self.pieces_on_board
            .iter()
            .copied()
            .find(|&id| {
                let piece = self.board.get(id);
                piece.kind() == PieceKind::King && piece.color() == color
            })
            .ok_or(ChessError::NoKingOnBoard(color))
    }

    fn make_move(&mut self, source: Position, target: Position) -> Result<MoveRecord, ChessError> {
        let piece = self
            .board
            .remove_piece(source)?
            .ok_or(MoveRejection::NoPieceOnSource)?;
        self.board.get_mut(piece).increase_move_count();
        let mut taken = self.board.remove_piece(target)?.map(|id| (id, target));
        self.board.place_piece(piece, target)?;

        let (kind, color) = {
            let moved = self.board.get(piece);
            (moved.kind(), moved.color())
        };

        let mut castling_rook = None;
        if kind == PieceKind::King {
            if let Some((rook_from, rook_to)) = movegen::castling_rook_squares(source, target) {
                if let Some(rook) = self.board.remove_piece(rook_from)? {
                    self.board.get_mut(rook).increase_move_count();
                    self.board.place_piece(rook, rook_to)?;
                    castling_rook = Some((rook_from, rook_to));
                }
            }
        }

        if kind == PieceKind::Pawn && source.column != target.column && taken.is_none() {
            let behind = target.offset(-color.pawn_direction(), 0);
            taken = self.board.remove_piece(behind)?.map(|id| (id, behind));
        }

        let capture = taken.map(|(id, at)| {
            let roster_index = self.pieces_on_board.iter().position(|&p| p == id);
            if let Some(index) = roster_index {
                self.pieces_on_board.remove(index);
            }
            self.captured_pieces.push(id);
            Capture {
                id,
                at,
                roster_index,
            }
        });

        Ok(MoveRecord {
            piece,
            source,
            target,
            capture,
            castling_rook,
        })
    }

    fn undo_move(&mut self, record: MoveRecord) -> Result<(), ChessError> {
        let moved = self.board.remove_piece(record.target)?;
        debug_assert_eq!(moved, Some(record.piece));
        self.board.get_mut(record.piece).decrease_move_count();
        self.board.place_piece(record.piece, record.source)?;

        if let Some((rook_from, rook_to)) = record.castling_rook {
            if let Some(rook) = self.board.remove_piece(rook_to)? {
                self.board.get_mut(rook).decrease_move_count();
                self.board.place_piece(rook, rook_from)?;
            }
        }

        if let Some(capture) = record.capture {
            self.board.place_piece(capture.id, capture.at)?;
            if let Some(index) = self.captured_pieces.iter().rposition(|&p| p == capture.id) {
                self.captured_pieces.remove(index);
            }
            if let Some(index) = capture.roster_index {
                self.pieces_on_board.insert(index, capture.id);
            }
        }
        Ok(())
    }

    /// Updates check and checkmate against the opponent and hands over the
    /// turn unless the match just ended.
    fn finish_turn(&mut self) -> Result<(), ChessError> {
        let opponent = self.current_player.opposite();
        self.check = self.test_check(opponent)?;
        if self.check {
            self.checkmate = self.test_checkmate(opponent)?;
        }

        if self.checkmate {
            debug!(winner = %self.current_player, turn = self.turn, "checkmate");
        } else {
            self.next_turn();
            if self.check {
                debug!(player = %self.current_player, "in check");
            }
        }
        Ok(())
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = self.current_player.opposite();
    }
}
