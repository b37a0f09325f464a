//! Per-move classification.
//!
//! Each position from index 1 onward is compared against the one before
//! it: evaluation loss picks a verdict, mate transitions have their own
//! tables, best moves may be upgraded to brilliant or great, and blunders
//! in already-decided positions are softened.

use chess_core::fen::{mover_color, parse_position};
use chess_core::{Classification, EngineLine, Evaluation, EvaluationKind, Position};
use shakmaty::{Chess, Color, Position as _, Square};
use tracing::{debug, warn};

use crate::board_utils::is_piece_hanging;
use crate::brilliancy;
use crate::classification::classify_centipawn_loss;

/// Second-best line at or above this (mover's view) means the game was won anyway
const WINNING_ANYWAYS_CP: i64 = 700;
/// Minimum gap between the two best lines for a "great" punishment
const GREAT_MOVE_GAP_CP: i64 = 150;
/// Blunders are forgiven beyond this margin either way
const DECIDED_POSITION_CP: i64 = 600;

/// Classify every move in order. Position 0 is never classified.
///
/// Positions are processed strictly in order because the great-move check
/// reads the previous move's final classification.
pub fn classify_positions(positions: &mut [Position]) {
    for i in 1..positions.len() {
        let (before, rest) = positions.split_at_mut(i);
        let last = &before[i - 1];
        let position = &mut rest[0];

        match classify_move(last, position) {
            Some(classification) => {
                debug!(
                    index = i,
                    played = position.played.as_ref().map(|m| m.uci.as_str()).unwrap_or(""),
                    %classification,
                    "Classified move"
                );
                position.classification = Some(classification);
            }
            None => {
                warn!(index = i, fen = %position.fen, "Skipping position with incomplete analysis");
            }
        }
    }
}

/// Classify the move that produced `position` from `last`.
///
/// Returns `None` when the input is too incomplete to judge (no best line
/// before the move, no recorded move, or an unreadable FEN). A terminal
/// `position` without engine lines gets a synthetic best line appended.
pub fn classify_move(last: &Position, position: &mut Position) -> Option<Classification> {
    let top_move = last.top_line()?;
    let second_top_move = last.line(2);
    let played = position.played.clone()?;

    let board = match parse_position(&position.fen) {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "Unreadable position");
            return None;
        }
    };

    let mover = mover_color(&position.fen);
    let previous_evaluation = top_move.evaluation;
    let evaluation = match position.top_line() {
        Some(line) => line.evaluation,
        None => synthesize_terminal_line(position, &board),
    };

    let eval_loss = evaluation_loss(last, &played.uci, previous_evaluation, evaluation, mover);

    // Only one move was worth considering
    let second_top_move = match second_top_move {
        Some(line) => line,
        None => return Some(Classification::Forced),
    };

    // Widened so engine scores anywhere in i32 can't overflow
    let sign: i64 = if mover == Color::White { 1 } else { -1 };
    let absolute_evaluation = i64::from(evaluation.value) * sign;
    let previous_absolute_evaluation = i64::from(previous_evaluation.value) * sign;
    let absolute_second_evaluation = i64::from(second_top_move.evaluation.value) * sign;
    let no_mate = previous_evaluation.is_cp() && evaluation.is_cp();

    let mut classification = if top_move.move_uci == played.uci {
        Some(Classification::Best)
    } else {
        classify_transition(
            previous_evaluation,
            evaluation,
            eval_loss,
            previous_absolute_evaluation,
            absolute_evaluation,
        )
    };

    if classification == Some(Classification::Best) {
        let last_board = match parse_position(&last.fen) {
            Ok(b) => Some(b),
            Err(e) => {
                warn!(error = %e, "Unreadable previous position, skipping upgrades");
                None
            }
        };

        if let Some(last_board) = last_board {
            let winning_anyways = (absolute_second_evaluation >= WINNING_ANYWAYS_CP && top_move.evaluation.is_cp())
                || (top_move.evaluation.is_mate() && second_top_move.evaluation.is_mate());

            if absolute_evaluation >= 0 && !winning_anyways && !played.is_promotion() {
                // No brilliancies out of check, and nothing further to try
                if last_board.is_check() {
                    return Some(Classification::Best);
                }

                if brilliancy::is_brilliant(&last_board, &board, &played, mover) {
                    classification = Some(Classification::Brilliant);
                }
            }

            if no_mate
                && classification != Some(Classification::Brilliant)
                && last.classification == Some(Classification::Blunder)
                && (i64::from(top_move.evaluation.value) - i64::from(second_top_move.evaluation.value)).abs()
                    >= GREAT_MOVE_GAP_CP
                && destination_is_safe(&last_board, &board, played.destination())
            {
                classification = Some(Classification::Great);
            }
        }
    }

    let classification = soften_blunder(
        classification,
        absolute_evaluation,
        previous_absolute_evaluation,
        no_mate,
    );

    Some(classification.unwrap_or(Classification::Book))
}

/// Blunders in an already decided game are downgraded to good.
fn soften_blunder(
    classification: Option<Classification>,
    absolute_evaluation: i64,
    previous_absolute_evaluation: i64,
    no_mate: bool,
) -> Option<Classification> {
    if classification != Some(Classification::Blunder) {
        return classification;
    }

    // Still completely winning after the move
    if absolute_evaluation >= DECIDED_POSITION_CP {
        return Some(Classification::Good);
    }

    // Already completely lost before the move
    if previous_absolute_evaluation <= -DECIDED_POSITION_CP && no_mate {
        return Some(Classification::Good);
    }

    classification
}

/// Append the best line for a position with no legal replies.
fn synthesize_terminal_line(position: &mut Position, board: &Chess) -> Evaluation {
    let evaluation = if board.is_checkmate() {
        Evaluation::mate(0)
    } else {
        Evaluation::cp(0)
    };

    position.top_lines.push(EngineLine {
        id: 1,
        depth: 0,
        evaluation,
        move_uci: String::new(),
        move_san: None,
    });

    evaluation
}

/// Advantage given up by the move, taking the most charitable of the
/// three estimates: current best line, the engine's own line for the
/// played move, and the cutoff evaluation.
fn evaluation_loss(
    last: &Position,
    played_uci: &str,
    previous_evaluation: Evaluation,
    evaluation: Evaluation,
    mover: Color,
) -> i64 {
    let loss = |origin: i32, target: i32| {
        let (origin, target) = (i64::from(origin), i64::from(target));
        if mover == Color::White {
            origin - target
        } else {
            target - origin
        }
    };

    let mut eval_loss = loss(previous_evaluation.value, evaluation.value);

    if let Some(matching_line) = last.top_lines.iter().find(|line| line.move_uci == played_uci) {
        eval_loss = eval_loss.min(loss(previous_evaluation.value, matching_line.evaluation.value));
    }

    if let Some(cutoff) = last.cutoff_evaluation {
        eval_loss = eval_loss.min(loss(cutoff.value, evaluation.value));
    }

    eval_loss
}

/// Verdict for a move that wasn't the engine's first choice, by evaluation type before and after.
fn classify_transition(
    previous_evaluation: Evaluation,
    evaluation: Evaluation,
    eval_loss: i64,
    previous_absolute_evaluation: i64,
    absolute_evaluation: i64,
) -> Option<Classification> {
    match (previous_evaluation.kind, evaluation.kind) {
        (EvaluationKind::Cp, EvaluationKind::Cp) => classify_centipawn_loss(eval_loss, previous_evaluation.value),

        // Walked into a forced mate
        (EvaluationKind::Cp, EvaluationKind::Mate) => Some(if absolute_evaluation > 0 {
            Classification::Best
        } else if absolute_evaluation >= -2 {
            Classification::Blunder
        } else if absolute_evaluation >= -5 {
            Classification::Mistake
        } else {
            Classification::Inaccuracy
        }),

        // A forced mate disappeared
        (EvaluationKind::Mate, EvaluationKind::Cp) => Some(
            if previous_absolute_evaluation < 0 && absolute_evaluation < 0 {
                Classification::Best
            } else if absolute_evaluation >= 400 {
                Classification::Good
            } else if absolute_evaluation >= 150 {
                Classification::Inaccuracy
            } else if absolute_evaluation >= -100 {
                Classification::Mistake
            } else {
                Classification::Blunder
            },
        ),

        // Mate on the board before and after
        (EvaluationKind::Mate, EvaluationKind::Mate) => Some(if previous_absolute_evaluation > 0 {
            if absolute_evaluation <= -4 {
                Classification::Mistake
            } else if absolute_evaluation < 0 {
                Classification::Blunder
            } else if absolute_evaluation < previous_absolute_evaluation {
                Classification::Best
            } else if absolute_evaluation <= previous_absolute_evaluation + 2 {
                Classification::Excellent
            } else {
                Classification::Good
            }
        } else if absolute_evaluation == previous_absolute_evaluation {
            Classification::Best
        } else {
            Classification::Good
        }),
    }
}

/// The moved piece is not left hanging on its destination square.
/// Unknown squares count as unsafe.
fn destination_is_safe(last_board: &Chess, board: &Chess, destination: Option<&str>) -> bool {
    let square = match destination.and_then(|d| d.parse::<Square>().ok()) {
        Some(sq) => sq,
        None => return false,
    };

    is_piece_hanging(last_board.board(), board, square) == Some(false)
}
