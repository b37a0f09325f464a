//! FEN helpers backed by shakmaty.

use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, FromSetup, Position, PositionError};
use thiserror::Error;

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Error, Debug)]
pub enum FenError {
    #[error("invalid FEN '{fen}': {source}")]
    Parse {
        fen: String,
        #[source]
        source: ParseFenError,
    },

    #[error("illegal position '{fen}': {reason}")]
    Illegal { fen: String, reason: String },
}

/// Parse a FEN string into a playable position.
/// Bad castling rights and en-passant squares are tolerated, anything else is rejected.
pub fn parse_position(fen: &str) -> Result<Chess, FenError> {
    let parsed: Fen = fen.parse().map_err(|source| FenError::Parse {
        fen: fen.to_string(),
        source,
    })?;

    parsed
        .into_position::<Chess>(CastlingMode::Standard)
        .or_else(PositionError::ignore_invalid_castling_rights)
        .or_else(PositionError::ignore_invalid_ep_square)
        .map_err(|e| FenError::Illegal {
            fen: fen.to_string(),
            reason: e.to_string(),
        })
}

/// Serialize a position back to FEN.
pub fn to_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// The piece-placement field (first token) of a FEN.
pub fn placement(fen: &str) -> &str {
    fen.split_whitespace().next().unwrap_or("")
}

/// Side to move according to the FEN's second field.
pub fn side_to_move(fen: &str) -> Option<Color> {
    match fen.split_whitespace().nth(1) {
        Some("w") => Some(Color::White),
        Some("b") => Some(Color::Black),
        _ => None,
    }
}

/// Colour of the player whose move produced this FEN.
/// Black to move means White just moved; anything else counts as Black.
pub fn mover_color(fen: &str) -> Color {
    match side_to_move(fen) {
        Some(Color::Black) => Color::White,
        _ => Color::Black,
    }
}

/// Same placement with `turn` to move and no en-passant square.
///
/// Returns `None` when that position is impossible, e.g. the side not to
/// move would be in check.
pub fn with_turn(pos: &Chess, turn: Color) -> Option<Chess> {
    let mut setup = pos.to_setup(EnPassantMode::Legal);
    setup.turn = turn;
    setup.ep_square = None;

    Chess::from_setup(setup, CastlingMode::Standard)
        .or_else(PositionError::ignore_invalid_castling_rights)
        .or_else(PositionError::ignore_impossible_check)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    #[test]
    fn test_parse_start_position() {
        let pos = parse_position(STANDARD_START_FEN).unwrap();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(to_fen(&pos), STANDARD_START_FEN);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_position("not a fen"), Err(FenError::Parse { .. })));
        // two white kings
        let err = parse_position("4k3/8/8/8/8/8/8/K3K3 w - - 0 1").unwrap_err();
        assert!(matches!(err, FenError::Illegal { .. }));
    }

    #[test]
    fn test_side_helpers() {
        let after_e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        assert_eq!(placement(after_e4), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
        assert_eq!(side_to_move(after_e4), Some(Color::Black));
        assert_eq!(mover_color(after_e4), Color::White);
        assert_eq!(mover_color(STANDARD_START_FEN), Color::Black);
        assert_eq!(side_to_move("8/8/8/8/8/8/8/8"), None);
    }

    #[test]
    fn test_with_turn_flips_and_clears_en_passant() {
        let pos = parse_position("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let flipped = with_turn(&pos, Color::Black).unwrap();
        assert_eq!(flipped.turn(), Color::Black);
        assert_eq!(flipped.board().piece_at(Square::E5), pos.board().piece_at(Square::E5));
        assert!(to_fen(&flipped).contains(" b KQkq - "));
    }

    #[test]
    fn test_with_turn_refuses_opposite_check() {
        // Black king is in check from the rook with Black to move; flipping
        // would leave the side not to move in check.
        let pos = parse_position("4k3/8/8/8/8/8/8/K3R3 b - - 0 1").unwrap();
        assert!(with_turn(&pos, Color::White).is_none());
    }
}
