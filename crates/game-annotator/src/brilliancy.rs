/// Sacrifice detection for brilliant-move classification.
///
/// A best move is brilliant when it leaves at least one of the mover's
/// pieces hanging and every way of taking those pieces is refuted: the
/// capture hangs something at least as valuable, or (for pieces below a
/// rook) lets the sacrificing side mate in one.

use chess_core::PlayedMove;
use shakmaty::{Chess, Color, Piece, Position, Role, Square};
use tracing::debug;

use crate::board_utils::{self, get_attackers, is_piece_hanging, piece_value, ROOK_VALUE};

/// A piece of the mover's left en prise by the move
#[derive(Debug, Clone, Copy)]
struct Sacrifice {
    square: Square,
    piece: Piece,
}

/// Decide whether a best move is a sound sacrifice.
///
/// - `last` is the position before the move
/// - `current` is the position after the move (opponent to move)
/// - `mover` is the side that played `played`
pub fn is_brilliant(last: &Chess, current: &Chess, played: &PlayedMove, mover: Color) -> bool {
    let captured = played
        .destination()
        .and_then(|dest| dest.parse::<Square>().ok())
        .and_then(|dest| last.board().piece_at(dest));
    let captured_value = board_utils::occupant_value(captured);

    let sacrifices = find_sacrifices(last, current, mover, captured_value);
    if sacrifices.is_empty() {
        return false;
    }

    let max_sacrificed_value = sacrifices
        .iter()
        .map(|s| piece_value(s.piece.role))
        .max()
        .unwrap_or(0);

    for sacrifice in &sacrifices {
        if is_viably_capturable(current, sacrifice, max_sacrificed_value) {
            debug!(
                square = %sacrifice.square,
                "Sacrificed piece can be taken safely, not brilliant"
            );
            return false;
        }
    }

    true
}

/// Hanging non-pawn, non-king pieces of the mover, skipping any worth no
/// more than what the move just captured (that's a trade, not a sacrifice).
fn find_sacrifices(last: &Chess, current: &Chess, mover: Color, captured_value: i32) -> Vec<Sacrifice> {
    let board = current.board();
    let mut sacrifices = Vec::new();

    for square in board.by_color(mover) {
        let piece = match board.piece_at(square) {
            Some(p) => p,
            None => continue,
        };
        if piece.role == Role::King || piece.role == Role::Pawn {
            continue;
        }
        if captured_value >= piece_value(piece.role) {
            continue;
        }

        if is_piece_hanging(last.board(), current, square) == Some(true) {
            sacrifices.push(Sacrifice { square, piece });
        }
    }

    sacrifices
}

/// Can the opponent take this piece without being punished?
fn is_viably_capturable(current: &Chess, sacrifice: &Sacrifice, max_sacrificed_value: i32) -> bool {
    let legal_moves = current.legal_moves();

    for attacker in get_attackers(current, sacrifice.square) {
        // Attackers that can't legally capture produce no evidence
        let captures = legal_moves.iter().filter(|m| {
            m.from() == Some(attacker.square) && m.to() == sacrifice.square && !m.is_castle()
        });

        for capture in captures {
            let mut after = current.clone();
            after.play_unchecked(capture.clone());

            let attacker_pinned = capture_hangs_material(current, &after, max_sacrificed_value);

            // Rook or more: brilliant regardless of mate-in-one follow-ups
            if piece_value(sacrifice.piece.role) >= ROOK_VALUE {
                if !attacker_pinned {
                    return true;
                }
            } else if !attacker_pinned && !has_mate_in_one(&after) {
                return true;
            }
        }
    }

    false
}

/// After the capture, does the capturing side have a piece worth at least
/// the biggest sacrifice left hanging?
fn capture_hangs_material(before_capture: &Chess, after_capture: &Chess, max_sacrificed_value: i32) -> bool {
    let board = after_capture.board();
    let capturing_side = !after_capture.turn();

    for square in board.by_color(capturing_side) {
        let piece = match board.piece_at(square) {
            Some(p) => p,
            None => continue,
        };
        if piece.role == Role::King || piece.role == Role::Pawn {
            continue;
        }

        if piece_value(piece.role) >= max_sacrificed_value
            && is_piece_hanging(before_capture.board(), after_capture, square) == Some(true)
        {
            return true;
        }
    }

    false
}

/// Does the side to move have a checkmate in one?
fn has_mate_in_one(pos: &Chess) -> bool {
    pos.legal_moves().iter().any(|m| {
        let mut after = pos.clone();
        after.play_unchecked(m.clone());
        after.is_checkmate()
    })
}
