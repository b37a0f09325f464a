//! Shared chess types for the game annotator.
//!
//! - [`game_data`] - positions, engine lines, evaluations and classifications
//! - [`fen`] - FEN parsing and side-to-move helpers on top of shakmaty
//! - [`san`] - coordinate to algebraic move conversion

pub mod fen;
pub mod game_data;
pub mod san;

pub use fen::FenError;
pub use game_data::{
    Classification, EngineLine, Evaluation, EvaluationKind, PlayedMove, Position, CLOUD_WORKER,
};
