//! Score normalization and aggregation

use crate::config::ScoringConfig;
use sentiment_shield_core::{Category, CategoryScores};

/// Scale a raw score by category weight and text length, floored at zero.
///
/// `normalized = raw * weight / max(1, token_count / length_divisor)`
pub fn normalize(raw: f64, weight: f64, token_count: usize, config: &ScoringConfig) -> f64 {
    let divisor = (token_count as f64 / config.length_divisor).max(1.0);
    let normalized = raw * weight / divisor;
    if normalized > 0.0 {
        normalized
    } else {
        0.0
    }
}

/// Collect normalized scores and their total.
///
/// `scored` yields `(category, raw, weight)`; the total is summed in the
/// order given.
pub fn aggregate(
    scored: impl IntoIterator<Item = (Category, f64, f64)>,
    token_count: usize,
    config: &ScoringConfig,
) -> (CategoryScores, f64) {
    let mut scores = CategoryScores::zero();
    let mut total = 0.0;

    for (category, raw, weight) in scored {
        let score = normalize(raw, weight, token_count, config);
        scores.set(category, score);
        total += score;
    }

    (scores, total)
}
