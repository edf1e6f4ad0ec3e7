//! Text rendering of a match and line-based input.

use crate::config::ConsoleConfig;
use chessmatch_core::{ChessPiece, ChessPosition, Color, COLUMNS, ROWS};
use chessmatch_engine::{ChessMatch, MatchState, MoveGrid};
use std::io::{self, BufRead, Write};

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_WHITE: &str = "\x1b[37m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_BLUE_BACKGROUND: &str = "\x1b[44m";

type Pieces = [[Option<ChessPiece>; COLUMNS as usize]; ROWS as usize];

/// Draws board and status text for one match.
pub struct Renderer {
    color: bool,
    show_captured: bool,
}

impl Renderer {
    pub fn new(config: &ConsoleConfig) -> Self {
        Renderer {
            color: config.color,
            show_captured: config.show_captured,
        }
    }

    /// Draws the board, highlighting the squares of `moves` if given.
    pub fn board(&self, out: &mut impl Write, pieces: &Pieces, moves: Option<MoveGrid>) -> io::Result<()> {
        let highlights = moves.map(MoveGrid::to_matrix);
        for (row, cells) in pieces.iter().enumerate() {
            write!(out, "{} ", ROWS as usize - row)?;
            for (column, piece) in cells.iter().enumerate() {
                let highlighted = highlights.is_some_and(|h| h[row][column]);
                self.square(out, *piece, highlighted)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "  a b c d e f g h")
    }

    fn square(&self, out: &mut impl Write, piece: Option<ChessPiece>, highlighted: bool) -> io::Result<()> {
        if !self.color {
            let symbol = piece.map_or('-', ChessPiece::symbol);
            let marker = if highlighted { '*' } else { ' ' };
            return write!(out, "{}{}", symbol, marker);
        }

        if highlighted {
            write!(out, "{}", ANSI_BLUE_BACKGROUND)?;
        }
        match piece {
            None => write!(out, "-{}", ANSI_RESET)?,
            Some(p) => {
                let tint = match p.color {
                    Color::White => ANSI_WHITE,
                    Color::Black => ANSI_YELLOW,
                };
                write!(out, "{}{}{}", tint, p, ANSI_RESET)?;
            }
        }
        write!(out, " ")
    }

    /// Draws the board followed by captured pieces, turn and status lines.
    pub fn match_status(
        &self,
        out: &mut impl Write,
        chess_match: &ChessMatch,
        captured: &[ChessPiece],
    ) -> io::Result<()> {
        self.board(out, &chess_match.pieces(), None)?;
        writeln!(out)?;
        if self.show_captured {
            self.captured(out, captured)?;
            writeln!(out)?;
        }
        writeln!(out, "Turn: {}", chess_match.turn())?;

        match chess_match.state() {
            MatchState::Checkmate => {
                writeln!(out, "CHECKMATE!")?;
                writeln!(out, "Winner: {}", chess_match.current_player())
            }
            state => {
                writeln!(out, "Waiting player: {}", chess_match.current_player())?;
                if state == MatchState::Check {
                    writeln!(out, "CHECK!")?;
                }
                Ok(())
            }
        }
    }

    fn captured(&self, out: &mut impl Write, captured: &[ChessPiece]) -> io::Result<()> {
        writeln!(out, "Captured pieces:")?;
        for color in Color::ALL {
            let letters: Vec<String> = captured
                .iter()
                .filter(|p| p.color == color)
                .map(|p| p.to_string())
                .collect();
            let line = format!("{}: [{}]", color, letters.join(", "));
            match (self.color, color) {
                (true, Color::White) => writeln!(out, "{}{}{}", ANSI_WHITE, line, ANSI_RESET)?,
                (true, Color::Black) => writeln!(out, "{}{}{}", ANSI_YELLOW, line, ANSI_RESET)?,
                (false, _) => writeln!(out, "{}", line)?,
            }
        }
        Ok(())
    }
}

/// Prints `label` and reads one trimmed line. Returns `None` at end of input.
pub fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Reads a square such as `e2`, prompting again after invalid input.
pub fn read_position(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> io::Result<Option<ChessPosition>> {
    loop {
        let Some(line) = prompt(input, out, label)? else {
            return Ok(None);
        };
        match line.parse::<ChessPosition>() {
            Ok(position) => return Ok(Some(position)),
            Err(e) => writeln!(out, "Error reading position: {}. Valid values are from a1 to h8.", e)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmatch_core::PieceKind;

    fn plain() -> Renderer {
        Renderer::new(&ConsoleConfig {
            color: false,
            ..ConsoleConfig::default()
        })
    }

    fn render(renderer: &Renderer, chess_match: &ChessMatch, moves: Option<MoveGrid>) -> String {
        let mut out = Vec::new();
        renderer.board(&mut out, &chess_match.pieces(), moves).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_starting_board() {
        let text = render(&plain(), &ChessMatch::new(), None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 r n b q k b n r ");
        assert_eq!(lines[1], "7 p p p p p p p p ");
        assert_eq!(lines[4], "4 - - - - - - - - ");
        assert_eq!(lines[7], "1 R N B Q K B N R ");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    #[test]
    fn plain_highlights_destinations() {
        let chess_match = ChessMatch::new();
        let moves = chess_match.possible_moves("b1".parse().unwrap()).unwrap();
        let text = render(&plain(), &chess_match, Some(moves));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "3 -*- -*- - - - - ");
    }

    #[test]
    fn colored_board_uses_ansi() {
        let renderer = Renderer::new(&ConsoleConfig::default());
        let chess_match = ChessMatch::new();
        let moves = chess_match.possible_moves("e2".parse().unwrap()).unwrap();
        let text = render(&renderer, &chess_match, Some(moves));
        assert!(text.contains(&format!("{}K{}", ANSI_WHITE, ANSI_RESET)));
        assert!(text.contains(&format!("{}K{}", ANSI_YELLOW, ANSI_RESET)));
        assert!(text.contains(&format!("{}-{}", ANSI_BLUE_BACKGROUND, ANSI_RESET)));
    }

    #[test]
    fn status_lists_captured_pieces() {
        let mut chess_match = ChessMatch::new();
        chess_match
            .perform_move("e2".parse().unwrap(), "e4".parse().unwrap())
            .unwrap();
        let captured = [
            ChessPiece::new(PieceKind::Knight, Color::Black),
            ChessPiece::new(PieceKind::Pawn, Color::White),
            ChessPiece::new(PieceKind::Pawn, Color::Black),
        ];
        let mut out = Vec::new();
        plain().match_status(&mut out, &chess_match, &captured).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("White: [P]"));
        assert!(text.contains("Black: [N, P]"));
        assert!(text.contains("Turn: 2"));
        assert!(text.contains("Waiting player: Black"));
        assert!(!text.contains("CHECK"));
    }

    #[test]
    fn status_hides_captured_when_disabled() {
        let renderer = Renderer::new(&ConsoleConfig {
            color: false,
            show_captured: false,
            ..ConsoleConfig::default()
        });
        let mut out = Vec::new();
        renderer.match_status(&mut out, &ChessMatch::new(), &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Captured pieces"));
        assert!(text.contains("Turn: 1"));
    }

    #[test]
    fn read_position_retries_until_valid() {
        let mut input = "z9\n\n  c7 \n".as_bytes();
        let mut out = Vec::new();
        let position = read_position(&mut input, &mut out, "Source: ").unwrap();
        assert_eq!(position, Some("c7".parse().unwrap()));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Source: ").count(), 3);
        assert_eq!(text.matches("Error reading position").count(), 2);
    }

    #[test]
    fn read_position_stops_at_end_of_input() {
        let mut input = "".as_bytes();
        let mut out = Vec::new();
        assert_eq!(read_position(&mut input, &mut out, "Target: ").unwrap(), None);
    }
}
