//! Per-side accuracy and classification counts, and the report they go into.

use chess_core::fen::mover_color;
use chess_core::{Classification, Position};
use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::classification::accuracy_value;

/// Move classification counts for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClassificationCounts {
    pub brilliant: u32,
    pub great: u32,
    pub best: u32,
    pub book: u32,
    pub excellent: u32,
    pub good: u32,
    pub inaccuracy: u32,
    pub mistake: u32,
    pub blunder: u32,
    pub forced: u32,
}

impl ClassificationCounts {
    pub fn record(&mut self, classification: Classification) {
        *self.slot(classification) += 1;
    }

    pub fn get(&self, classification: Classification) -> u32 {
        match classification {
            Classification::Brilliant => self.brilliant,
            Classification::Great => self.great,
            Classification::Best => self.best,
            Classification::Book => self.book,
            Classification::Excellent => self.excellent,
            Classification::Good => self.good,
            Classification::Inaccuracy => self.inaccuracy,
            Classification::Mistake => self.mistake,
            Classification::Blunder => self.blunder,
            Classification::Forced => self.forced,
        }
    }

    pub fn total(&self) -> u32 {
        Classification::ALL.iter().map(|&c| self.get(c)).sum()
    }

    fn slot(&mut self, classification: Classification) -> &mut u32 {
        match classification {
            Classification::Brilliant => &mut self.brilliant,
            Classification::Great => &mut self.great,
            Classification::Best => &mut self.best,
            Classification::Book => &mut self.book,
            Classification::Excellent => &mut self.excellent,
            Classification::Good => &mut self.good,
            Classification::Inaccuracy => &mut self.inaccuracy,
            Classification::Mistake => &mut self.mistake,
            Classification::Blunder => &mut self.blunder,
            Classification::Forced => &mut self.forced,
        }
    }
}

/// A value per side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Sides<T> {
    pub white: T,
    pub black: T,
}

impl<T> Sides<T> {
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// Finished analysis of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// 0-100 per side
    pub accuracies: Sides<f64>,
    pub classifications: Sides<ClassificationCounts>,
    pub positions: Vec<Position>,
}

impl Report {
    /// Aggregate classified positions. Unclassified positions don't count.
    pub fn from_positions(positions: Vec<Position>) -> Self {
        let mut classifications: Sides<ClassificationCounts> = Sides::default();
        let mut credit: Sides<f64> = Sides::default();

        for position in positions.iter().skip(1) {
            let classification = match position.classification {
                Some(c) => c,
                None => continue,
            };
            let mover = mover_color(&position.fen);

            classifications.get_mut(mover).record(classification);
            *credit.get_mut(mover) += accuracy_value(classification);
        }

        let accuracies = Sides {
            white: calculate_accuracy(credit.white, classifications.white.total()),
            black: calculate_accuracy(credit.black, classifications.black.total()),
        };

        Self {
            accuracies,
            classifications,
            positions,
        }
    }
}

/// Mean accuracy credit as a percentage. No moves means 0.
pub fn calculate_accuracy(total_credit: f64, move_count: u32) -> f64 {
    if move_count == 0 {
        return 0.0;
    }
    let accuracy = 100.0 * total_credit / move_count as f64;
    accuracy.clamp(0.0, 100.0)
}
