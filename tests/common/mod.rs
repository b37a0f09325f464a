#![allow(dead_code)]

use chess_core::fen::{parse_position, to_fen, STANDARD_START_FEN};
use chess_core::san::{parse_uci, san_with_suffix};
use chess_core::{EngineLine, Evaluation, PlayedMove, Position};
use shakmaty::{Chess, Position as _};

/// Engine line with a centipawn score.
pub fn cp(id: u32, uci: &str, value: i32) -> EngineLine {
    line(id, uci, Evaluation::cp(value))
}

/// Engine line with a mate score.
pub fn mate(id: u32, uci: &str, value: i32) -> EngineLine {
    line(id, uci, Evaluation::mate(value))
}

fn line(id: u32, uci: &str, evaluation: Evaluation) -> EngineLine {
    EngineLine {
        id,
        depth: 18,
        evaluation,
        move_uci: uci.to_string(),
        move_san: None,
    }
}

/// Builds a game by playing moves on a real board, so every FEN and SAN
/// is consistent with the move that produced it.
pub struct GameBuilder {
    board: Chess,
    positions: Vec<Position>,
}

impl GameBuilder {
    pub fn new(fen: &str, top_lines: Vec<EngineLine>) -> Self {
        let board = parse_position(fen).unwrap_or_else(|e| panic!("bad test FEN: {e}"));
        let mut start = Position::new(to_fen(&board));
        start.top_lines = top_lines;
        Self {
            board,
            positions: vec![start],
        }
    }

    pub fn standard(top_lines: Vec<EngineLine>) -> Self {
        Self::new(STANDARD_START_FEN, top_lines)
    }

    /// Play `uci` and attach the engine lines for the resulting position.
    pub fn play(mut self, uci: &str, top_lines: Vec<EngineLine>) -> Self {
        let m = parse_uci(&self.board, uci).unwrap_or_else(|| panic!("illegal test move {uci}"));
        let san = san_with_suffix(&self.board, &m);
        self.board.play_unchecked(m);

        let mut position = Position::new(to_fen(&self.board));
        position.played = Some(PlayedMove {
            san,
            uci: uci.to_string(),
        });
        position.top_lines = top_lines;
        self.positions.push(position);
        self
    }

    /// Mark the most recent position as evaluated by the given worker.
    pub fn worker(mut self, worker: &str) -> Self {
        if let Some(last) = self.positions.last_mut() {
            last.worker = Some(worker.to_string());
        }
        self
    }

    pub fn build(self) -> Vec<Position> {
        self.positions
    }
}

/// Path to the bundled opening reference data.
pub fn openings_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/openings.json")
}
