/// Board utility functions for sacrifice detection
/// Attacker/defender enumeration and the hanging-piece test used by the classifier.

use chess_core::fen::with_turn;
use shakmaty::{
    attacks, Board, CastlingMode, Chess, EnPassantMode, FromSetup, Piece, Position, PositionError, Role, Square,
};

// Piece values for material comparisons
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 99;

/// Piece value including king
pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Value of whatever stood on a square; an empty square is worth nothing.
pub fn occupant_value(piece: Option<Piece>) -> i32 {
    piece.map(|p| piece_value(p.role)).unwrap_or(0)
}

/// A piece that can capture on (or recapture on) a given square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attacker {
    pub square: Square,
    pub piece: Piece,
}

impl Attacker {
    pub fn value(&self) -> i32 {
        piece_value(self.piece.role)
    }
}

/// Pieces of the opposite colour that can take the piece on `square`.
///
/// The enemy side is put on move and its legal captures onto the square
/// are collected, one entry per origin square. An adjacent enemy king is
/// added when the capture is legal or when other attackers exist (it can
/// join an exchange once the square is cleared). Returns an empty list for
/// an empty square.
pub fn get_attackers(pos: &Chess, square: Square) -> Vec<Attacker> {
    let board = pos.board();
    let target = match board.piece_at(square) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let enemy = !target.color;

    let mut attackers: Vec<Attacker> = Vec::new();
    match with_turn(pos, enemy) {
        Some(enemy_to_move) => {
            for m in enemy_to_move.legal_moves() {
                if m.to() != square || m.is_castle() {
                    continue;
                }
                let from = match m.from() {
                    Some(sq) => sq,
                    None => continue,
                };
                if attackers.iter().any(|a| a.square == from) {
                    continue;
                }
                if let Some(piece) = board.piece_at(from) {
                    attackers.push(Attacker { square: from, piece });
                }
            }
        }
        None => {
            // Position can't be flipped (the side to move is in check):
            // fall back to raw attacks
            for from in board.attacks_to(square, enemy, board.occupied()) {
                if let Some(piece) = board.piece_at(from) {
                    attackers.push(Attacker { square: from, piece });
                }
            }
        }
    }

    let enemy_king = attacks::king_attacks(square) & board.kings() & board.by_color(enemy);
    if let Some(king_square) = enemy_king.first() {
        let listed = attackers.iter().any(|a| a.square == king_square);
        if !listed && !attackers.is_empty() {
            attackers.push(Attacker {
                square: king_square,
                piece: Piece {
                    color: enemy,
                    role: Role::King,
                },
            });
        }
    }

    attackers
}

/// Pieces that would recapture on `square` after it is taken.
///
/// With an attacker available, the first attacker makes the capture and
/// the pieces able to take it back are returned. Without one, an enemy
/// queen is dropped on the square and its attackers are returned.
pub fn get_defenders(pos: &Chess, square: Square) -> Vec<Attacker> {
    let target = match pos.board().piece_at(square) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let attackers = get_attackers(pos, square);
    match attackers.first() {
        Some(test_attacker) => {
            let attacker_to_move = match with_turn(pos, test_attacker.piece.color) {
                Some(p) => p,
                None => return Vec::new(),
            };
            let capture = attacker_to_move
                .legal_moves()
                .into_iter()
                .find(|m| m.from() == Some(test_attacker.square) && m.to() == square && !m.is_castle());

            match capture {
                Some(m) => {
                    let mut after = attacker_to_move;
                    after.play_unchecked(m);
                    get_attackers(&after, square)
                }
                None => Vec::new(),
            }
        }
        None => {
            let mut setup = pos.to_setup(EnPassantMode::Legal);
            setup.turn = target.color;
            setup.ep_square = None;
            setup.board.set_piece_at(
                square,
                Piece {
                    color: !target.color,
                    role: Role::Queen,
                },
            );

            match Chess::from_setup(setup, CastlingMode::Standard)
                .or_else(PositionError::ignore_invalid_castling_rights)
                .or_else(PositionError::ignore_impossible_check)
            {
                Ok(probe) => get_attackers(&probe, square),
                Err(_) => Vec::new(),
            }
        }
    }
}

/// Is the piece on `square` in `pos` capturable at a profit?
///
/// `last` is the board before the move that produced `pos`; it is used to
/// recognise pieces that just completed an equal or favourable trade.
/// Returns `None` when the square is empty.
pub fn is_piece_hanging(last: &Board, pos: &Chess, square: Square) -> Option<bool> {
    let piece = pos.board().piece_at(square)?;
    let value = piece_value(piece.role);

    let attackers = get_attackers(pos, square);
    let defenders = get_defenders(pos, square);

    if let Some(last_piece) = last.piece_at(square) {
        // Piece just traded for something worth as much or more
        if piece_value(last_piece.role) >= value && last_piece.color != piece.color {
            return Some(false);
        }

        // Rook took a minor piece that only one other minor defends:
        // the exchange favours the rook's side
        if piece.role == Role::Rook
            && piece_value(last_piece.role) == KNIGHT_VALUE
            && attackers.len() == 1
            && attackers.iter().all(|a| a.value() == KNIGHT_VALUE)
        {
            return Some(false);
        }
    }

    if attackers.iter().any(|a| a.value() < value) {
        return Some(true);
    }

    if attackers.len() > defenders.len() {
        let min_attacker_value = attackers.iter().map(Attacker::value).min().unwrap_or(KING_VALUE);

        // Taking would itself be a sacrifice for the attacker
        if value < min_attacker_value && defenders.iter().any(|d| d.value() < min_attacker_value) {
            return Some(false);
        }

        // A pawn defender means the real sacrifice is the pawn
        if defenders.iter().any(|d| d.piece.role == Role::Pawn) {
            return Some(false);
        }

        return Some(true);
    }

    Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::fen::parse_position;
    use shakmaty::Color;

    fn squares(list: &[Attacker]) -> Vec<Square> {
        let mut out: Vec<Square> = list.iter().map(|a| a.square).collect();
        out.sort();
        out
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(piece_value(Role::Pawn), 1);
        assert_eq!(piece_value(Role::Bishop), piece_value(Role::Knight));
        assert!(piece_value(Role::King) > piece_value(Role::Queen));
        assert_eq!(occupant_value(None), 0);
    }

    #[test]
    fn test_attackers_of_empty_square() {
        let pos = parse_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(get_attackers(&pos, Square::D4).is_empty());
        assert!(get_defenders(&pos, Square::D4).is_empty());
    }

    #[test]
    fn test_attackers_knight_and_pawn() {
        // Black knight on d5 attacked by the e4 pawn and the c3 knight
        let pos = parse_position("4k3/8/8/3n4/4P3/2N5/8/4K3 b - - 0 1").unwrap();
        let attackers = get_attackers(&pos, Square::D5);
        assert_eq!(squares(&attackers), vec![Square::C3, Square::E4]);
        assert!(attackers.iter().all(|a| a.piece.color == Color::White));
    }

    #[test]
    fn test_attackers_promotion_capture_counted_once() {
        // b7 pawn can take the rook on a8 with four different promotions
        let pos = parse_position("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let attackers = get_attackers(&pos, Square::A8);
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].square, Square::B7);
    }

    #[test]
    fn test_pinned_piece_is_not_an_attacker() {
        // The e4 knight is pinned to the white king by the e8 rook
        let pos = parse_position("4r2k/8/3b4/8/4N3/8/8/4K3 b - - 0 1").unwrap();
        assert!(get_attackers(&pos, Square::D6).is_empty());
    }

    #[test]
    fn test_undefended_piece_hangs() {
        // White just played Nd5?? into the black queen's reach... it's undefended
        let before = parse_position("3qk3/8/8/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        let after = parse_position("3qk3/8/8/3N4/8/8/8/4K3 b - - 1 1").unwrap();
        assert_eq!(is_piece_hanging(before.board(), &after, Square::D5), Some(true));
    }

    #[test]
    fn test_defended_piece_vs_equal_attacker_not_hanging() {
        // Knight on d5 is defended by the e4 pawn and attacked only by the f6 knight
        let before = parse_position("4k3/8/5n2/8/4P3/2N5/8/4K3 w - - 0 1").unwrap();
        let after = parse_position("4k3/8/5n2/3N4/4P3/8/8/4K3 b - - 1 1").unwrap();
        assert_eq!(is_piece_hanging(before.board(), &after, Square::D5), Some(false));
    }

    #[test]
    fn test_attacked_by_lower_value_hangs() {
        // Queen on d5 attacked by the c6 pawn, even though it's defended
        let before = parse_position("4k3/8/2p5/8/4P3/8/3Q4/4K3 w - - 0 1").unwrap();
        let after = parse_position("4k3/8/2p5/3Q4/4P3/8/8/4K3 b - - 1 1").unwrap();
        assert_eq!(is_piece_hanging(before.board(), &after, Square::D5), Some(true));
    }

    #[test]
    fn test_equal_trade_not_hanging() {
        // Knight just captured a knight on d5; recapture is only an even trade
        let before = parse_position("4k3/8/2n5/3n4/8/2N5/8/4K3 w - - 0 1").unwrap();
        let after = parse_position("4k3/8/2n5/3N4/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(is_piece_hanging(before.board(), &after, Square::D5), Some(false));
    }

    #[test]
    fn test_hanging_on_empty_square_is_none() {
        let pos = parse_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(is_piece_hanging(pos.board(), &pos, Square::D4), None);
    }
}
