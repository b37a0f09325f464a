//! Coordinate (UCI) to algebraic (SAN) conversion.

use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Move, Position};

/// Resolve a coordinate move ("e2e4", "e7e8q") against a position.
pub fn parse_uci(pos: &Chess, uci: &str) -> Option<Move> {
    let uci_move: UciMove = uci.parse().ok()?;
    uci_move.to_move(pos).ok()
}

/// SAN for a legal move, with a `+` or `#` suffix.
pub fn san_with_suffix(pos: &Chess, m: &Move) -> String {
    let mut san = San::from_move(pos, m.clone()).to_string();

    let mut after = pos.clone();
    after.play_unchecked(m.clone());
    if after.is_checkmate() {
        san.push('#');
    } else if after.is_check() {
        san.push('+');
    }

    san
}

/// Convert a single UCI move to SAN at a given position.
/// Returns `None` when the move is malformed or illegal there.
pub fn uci_to_san(pos: &Chess, uci: &str) -> Option<String> {
    let legal_move = parse_uci(pos, uci)?;
    Some(san_with_suffix(pos, &legal_move))
}
