//! Annotation pipeline
//!
//! classify -> tag openings -> book moves -> line SAN -> report

use chess_core::Position;
use tracing::info;

use crate::accuracy::Report;
use crate::classifier::classify_positions;
use crate::error::AnnotatorError;
use crate::lines::annotate_lines;
use crate::openings::{apply_book_moves, tag_openings, Opening, OpeningIndex};

/// Annotate a game and build its report.
///
/// `positions[0]` is the starting position; every later entry carries the
/// move that produced it. Positions should come in unannotated: existing
/// classifications feed into the great-move and book checks.
pub fn analyse(mut positions: Vec<Position>, openings: &[Opening]) -> Result<Report, AnnotatorError> {
    if positions.is_empty() {
        return Err(AnnotatorError::EmptyGame);
    }

    info!(positions = positions.len(), "Starting analysis");

    classify_positions(&mut positions);

    let index = OpeningIndex::new(openings);
    tag_openings(&mut positions, &index);
    let book_moves = apply_book_moves(&mut positions);

    annotate_lines(&mut positions);

    let report = Report::from_positions(positions);
    info!(
        white_accuracy = report.accuracies.white,
        black_accuracy = report.accuracies.black,
        book_moves,
        "Analysis complete"
    );

    Ok(report)
}
