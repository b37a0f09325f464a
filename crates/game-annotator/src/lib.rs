//! Chess game annotation.
//!
//! Takes a game as a list of positions with engine lines attached and
//! classifies every move (brilliant through blunder), names the opening,
//! fills in SAN for the engine lines and scores each side's accuracy.

pub mod accuracy;
pub mod analyzer;
pub mod board_utils;
pub mod brilliancy;
pub mod classification;
pub mod classifier;
pub mod config;
pub mod error;
pub mod lines;
pub mod openings;

pub use accuracy::{ClassificationCounts, Report, Sides};
pub use analyzer::analyse;
pub use config::AnnotatorConfig;
pub use error::AnnotatorError;
pub use openings::{load_openings, load_openings_or_empty, Opening, OpeningIndex};
