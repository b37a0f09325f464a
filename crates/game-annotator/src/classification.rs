/// Classification tables, pure functions only
/// (accuracy values, centipawn thresholds, book-eligible kinds)

use chess_core::Classification;

/// Accuracy credit per classification, in table order.
/// The order matters: book promotion uses a fixed slice of it.
pub const ACCURACY_VALUES: [(Classification, f64); 10] = [
    (Classification::Blunder, 0.0),
    (Classification::Mistake, 0.2),
    (Classification::Inaccuracy, 0.4),
    (Classification::Good, 0.65),
    (Classification::Excellent, 0.9),
    (Classification::Best, 1.0),
    (Classification::Great, 1.0),
    (Classification::Brilliant, 1.0),
    (Classification::Book, 1.0),
    (Classification::Forced, 1.0),
];

/// Centipawn verdicts, walked from most to least favourable
pub const CENTIPAWN_CLASSIFICATIONS: [Classification; 5] = [
    Classification::Excellent,
    Classification::Good,
    Classification::Inaccuracy,
    Classification::Mistake,
    Classification::Blunder,
];

pub fn accuracy_value(classification: Classification) -> f64 {
    ACCURACY_VALUES
        .iter()
        .find(|(kind, _)| *kind == classification)
        .map(|(_, value)| *value)
        .unwrap_or(0.0)
}

/// Classifications that a cloud-evaluated opening move may be promoted to book from.
pub fn is_book_eligible(classification: Classification) -> bool {
    ACCURACY_VALUES[4..8].iter().any(|(kind, _)| *kind == classification)
}

/// Largest evaluation loss (centipawns) still earning `classification`,
/// given the evaluation before the move. More tolerant the further the
/// position already is from equality.
pub fn evaluation_loss_threshold(classification: Classification, previous_eval: i32) -> f64 {
    let p = previous_eval.unsigned_abs() as f64;

    let threshold = match classification {
        Classification::Excellent => 0.0002 * p * p + 0.1231 * p + 27.5455,
        Classification::Good => 0.0002 * p * p + 0.2643 * p + 60.5455,
        Classification::Inaccuracy => 0.0002 * p * p + 0.3624 * p + 108.0909,
        Classification::Mistake => 0.0003 * p * p + 0.4027 * p + 225.8182,
        _ => f64::INFINITY,
    };

    threshold.max(0.0)
}

/// First centipawn verdict whose threshold covers `eval_loss`.
pub fn classify_centipawn_loss(eval_loss: i64, previous_eval: i32) -> Option<Classification> {
    CENTIPAWN_CLASSIFICATIONS
        .iter()
        .copied()
        .find(|&kind| eval_loss as f64 <= evaluation_loss_threshold(kind, previous_eval))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_values() {
        assert_eq!(accuracy_value(Classification::Blunder), 0.0);
        assert_eq!(accuracy_value(Classification::Good), 0.65);
        assert_eq!(accuracy_value(Classification::Brilliant), 1.0);
        assert_eq!(accuracy_value(Classification::Forced), 1.0);
        assert!(accuracy_value(Classification::Excellent) < 1.0);
    }

    #[test]
    fn test_book_eligible_slice() {
        assert!(is_book_eligible(Classification::Excellent));
        assert!(is_book_eligible(Classification::Best));
        assert!(is_book_eligible(Classification::Great));
        assert!(is_book_eligible(Classification::Brilliant));
        assert!(!is_book_eligible(Classification::Good));
        assert!(!is_book_eligible(Classification::Book));
        assert!(!is_book_eligible(Classification::Inaccuracy));
    }

    #[test]
    fn test_thresholds_ordered_and_growing() {
        for prev in [0, 50, 150, 300, 700, 1500, -300] {
            let thresholds: Vec<f64> = CENTIPAWN_CLASSIFICATIONS
                .iter()
                .map(|&kind| evaluation_loss_threshold(kind, prev))
                .collect();
            assert!(thresholds.windows(2).all(|w| w[0] <= w[1]), "prev={prev}");
            assert!(thresholds[4].is_infinite());
        }

        let near_equal = evaluation_loss_threshold(Classification::Inaccuracy, 20);
        let winning = evaluation_loss_threshold(Classification::Inaccuracy, 600);
        assert!(winning > near_equal);
        // sign of the previous evaluation doesn't matter
        assert_eq!(
            evaluation_loss_threshold(Classification::Good, -400),
            evaluation_loss_threshold(Classification::Good, 400)
        );
    }

    #[test]
    fn test_classify_centipawn_loss() {
        assert_eq!(classify_centipawn_loss(10, 300), Some(Classification::Excellent));
        assert_eq!(classify_centipawn_loss(-50, 0), Some(Classification::Excellent));
        assert_eq!(classify_centipawn_loss(50, 0), Some(Classification::Good));
        assert_eq!(classify_centipawn_loss(100, 0), Some(Classification::Inaccuracy));
        assert_eq!(classify_centipawn_loss(200, 0), Some(Classification::Mistake));
        assert_eq!(classify_centipawn_loss(400, 0), Some(Classification::Blunder));
        // same loss is only an inaccuracy when already far ahead
        assert_eq!(classify_centipawn_loss(400, 800), Some(Classification::Inaccuracy));
    }
}
