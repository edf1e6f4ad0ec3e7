//! The read-evaluate-print loop of a console match.

use crate::ui::{self, Renderer};
use chessmatch_core::ChessPiece;
use chessmatch_engine::ChessMatch;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize match: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the match is shown after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Plays one match, reading moves from `input` and writing to `output`.
pub struct Session<R, W> {
    input: R,
    output: W,
    renderer: Renderer,
    mode: OutputMode,
    captured: Vec<ChessPiece>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, renderer: Renderer, mode: OutputMode) -> Self {
        Session {
            input,
            output,
            renderer,
            mode,
            captured: Vec::new(),
        }
    }

    /// Runs until checkmate or end of input.
    pub fn run(&mut self, chess_match: &mut ChessMatch) -> Result<(), SessionError> {
        while !chess_match.is_checkmate() {
            self.show(chess_match)?;
            if !self.play_turn(chess_match)? {
                tracing::info!("input closed, leaving match");
                return Ok(());
            }
        }
        self.show(chess_match)?;
        tracing::info!(winner = ?chess_match.winner(), turn = chess_match.turn(), "match finished");
        Ok(())
    }

    fn show(&mut self, chess_match: &ChessMatch) -> Result<(), SessionError> {
        writeln!(self.output)?;
        match self.mode {
            OutputMode::Text => {
                self.renderer
                    .match_status(&mut self.output, chess_match, &self.captured)?
            }
            OutputMode::Json => {
                serde_json::to_writer(&mut self.output, &chess_match.snapshot())?;
                writeln!(self.output)?;
            }
        }
        Ok(())
    }

    /// Reads and plays one move. Returns false once input is exhausted.
    fn play_turn(&mut self, chess_match: &mut ChessMatch) -> Result<bool, SessionError> {
        writeln!(self.output)?;
        let Some(source) = ui::read_position(&mut self.input, &mut self.output, "Source: ")? else {
            return Ok(false);
        };
        let moves = match chess_match.possible_moves(source) {
            Ok(moves) => moves,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(true);
            }
        };

        writeln!(self.output)?;
        if self.mode == OutputMode::Text {
            self.renderer
                .board(&mut self.output, &chess_match.pieces(), Some(moves))?;
        }
        writeln!(self.output)?;
        let Some(target) = ui::read_position(&mut self.input, &mut self.output, "Target: ")? else {
            return Ok(false);
        };

        match chess_match.perform_move(source, target) {
            Ok(captured) => self.captured.extend(captured),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(true);
            }
        }

        while chess_match.promoted().is_some() {
            let Some(code) = ui::prompt(
                &mut self.input,
                &mut self.output,
                "Enter piece for promotion (B/N/R/Q): ",
            )?
            else {
                return Ok(false);
            };
            if let Err(e) = chess_match.replace_promoted_piece(&code) {
                writeln!(self.output, "{}", e)?;
            }
        }
        Ok(true)
    }
}
