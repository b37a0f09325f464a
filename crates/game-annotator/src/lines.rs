//! SAN for engine lines

use chess_core::fen::parse_position;
use chess_core::san::uci_to_san;
use chess_core::Position;
use tracing::warn;

/// Fill `moveSAN` on every engine line of every position.
///
/// Lines marking a finished game (mate in 0) carry no move and are left
/// alone. A move that can't be played gets an empty string.
pub fn annotate_lines(positions: &mut [Position]) {
    for position in positions.iter_mut() {
        let board = match parse_position(&position.fen) {
            Ok(b) => Some(b),
            Err(e) => {
                warn!(error = %e, "Cannot derive SAN for engine lines");
                None
            }
        };

        for line in position.top_lines.iter_mut() {
            if line.evaluation.is_mate() && line.evaluation.value == 0 {
                continue;
            }

            let san = board.as_ref().and_then(|b| uci_to_san(b, &line.move_uci));
            if san.is_none() {
                warn!(uci = %line.move_uci, fen = %position.fen, "Engine line move is not legal");
            }
            line.move_san = Some(san.unwrap_or_default());
        }
    }
}
