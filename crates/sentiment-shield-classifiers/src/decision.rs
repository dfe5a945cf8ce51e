//! Dominant category, sentiment and confidence

use crate::config::ScoringConfig;
use sentiment_shield_core::{Category, CategoryScores, Sentiment};

/// Outcome of the decision stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub sentiment: Sentiment,
    pub dominant_category: Option<Category>,
    pub dominant_score: f64,
    pub confidence: f64,
}

/// Pick the dominant category and derive sentiment and confidence.
///
/// The dominant category is the first maximum in declaration order, so
/// equal scores resolve to the earlier category. There is none when
/// `total` is zero.
pub fn decide(scores: &CategoryScores, total: f64, config: &ScoringConfig) -> Decision {
    let dominant = if total > 0.0 {
        scores
            .iter()
            .fold(None, |best: Option<(Category, f64)>, (category, score)| match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((category, score)),
            })
    } else {
        None
    };

    let sentiment = if total > config.sentiment_threshold {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    Decision {
        sentiment,
        dominant_category: dominant.map(|(category, _)| category),
        dominant_score: dominant.map_or(0.0, |(_, score)| score),
        confidence: (total / 2.0).min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[(Category, f64)]) -> CategoryScores {
        let mut scores = CategoryScores::zero();
        for (category, value) in values {
            scores.set(*category, *value);
        }
        scores
    }

    #[test]
    fn test_no_dominant_when_total_zero() {
        let decision = decide(&CategoryScores::zero(), 0.0, &ScoringConfig::default());
        assert_eq!(decision.dominant_category, None);
        assert_eq!(decision.dominant_score, 0.0);
        assert_eq!(decision.sentiment, Sentiment::Neutral);
        assert_eq!(decision.confidence, 0.0);
    }

    #[test]
    fn test_highest_score_wins() {
        let s = scores(&[(Category::Anger, 0.4), (Category::Fear, 0.9)]);
        let decision = decide(&s, s.total(), &ScoringConfig::default());
        assert_eq!(decision.dominant_category, Some(Category::Fear));
        assert_eq!(decision.dominant_score, 0.9);
    }

    #[test]
    fn test_tie_resolves_to_declaration_order() {
        let s = scores(&[(Category::Spam, 0.7), (Category::Sadness, 0.7)]);
        let decision = decide(&s, s.total(), &ScoringConfig::default());
        assert_eq!(decision.dominant_category, Some(Category::Sadness));

        let s = scores(&[(Category::Fear, 1.2), (Category::Toxic, 1.2), (Category::Anger, 1.2)]);
        let decision = decide(&s, s.total(), &ScoringConfig::default());
        assert_eq!(decision.dominant_category, Some(Category::Anger));
    }

    #[test]
    fn test_sentiment_threshold_is_strict() {
        let config = ScoringConfig::default();
        let at = scores(&[(Category::Spam, 0.15)]);
        assert_eq!(decide(&at, 0.15, &config).sentiment, Sentiment::Neutral);

        let above = scores(&[(Category::Spam, 0.151)]);
        assert_eq!(decide(&above, 0.151, &config).sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_low_total_still_has_dominant() {
        let s = scores(&[(Category::Fear, 0.1)]);
        let decision = decide(&s, 0.1, &ScoringConfig::default());
        assert_eq!(decision.sentiment, Sentiment::Neutral);
        assert_eq!(decision.dominant_category, Some(Category::Fear));
    }

    #[test]
    fn test_confidence_is_capped() {
        let s = scores(&[(Category::Toxic, 6.0)]);
        assert_eq!(decide(&s, 6.0, &ScoringConfig::default()).confidence, 1.0);

        let s = scores(&[(Category::Toxic, 0.5)]);
        assert_eq!(decide(&s, 0.5, &ScoringConfig::default()).confidence, 0.25);
    }
}
