//! Score classification
//!
//! Three independent classifiers are kept side by side:
//! - class-10 comments for each of the ten classes (per-mode breakdown),
//! - class-10 bands used as the headline label of the extended grid,
//! - raw-score thresholds used by the simple grid.

use crate::app::models::HeadlineScore;
use crate::constants::{CLASS10_COMMENTS, class10_bands, thresholds};

/// Comment for a class between 1 and 10; anything else yields `None`
pub fn class10_comment(class: Option<i64>) -> Option<&'static str> {
    let class = class?;
    if !(1..=10).contains(&class) {
        return None;
    }
    CLASS10_COMMENTS.get((class - 1) as usize).copied()
}

/// Headline band for a class-10 score
pub fn class10_band(class: Option<i64>) -> Option<&'static str> {
    let class = class?;
    let band = if class <= 2 {
        class10_bands::VERY_LOW
    } else if class <= 4 {
        class10_bands::LOW_TO_AVERAGE
    } else if class <= 6 {
        class10_bands::AVERAGE_TO_FAIR
    } else if class <= 8 {
        class10_bands::GOOD_TO_VERY_GOOD
    } else {
        class10_bands::EXCELLENT
    };
    Some(band)
}

/// Label for a raw score of the simple grid
///
/// The first threshold is checked before the smaller ones, so every score
/// below 1000 is "faible" and everything else is "excellent". This is the
/// observed ranking of the published grid and is kept as is.
pub fn threshold_label(score: f64) -> &'static str {
    if score < thresholds::FIRST {
        thresholds::LOW
    } else if score < thresholds::SECOND {
        thresholds::AVERAGE
    } else if score < thresholds::THIRD {
        thresholds::GOOD
    } else {
        thresholds::EXCELLENT
    }
}

/// Classify a headline score with the classifier matching its variant
pub fn classify(score: &HeadlineScore) -> Option<&'static str> {
    match score {
        HeadlineScore::Raw(value) => Some(threshold_label(*value)),
        HeadlineScore::Class10(class) => class10_band(Some(*class)),
    }
}
