//! Emotion classification engine
//!
//! Runs tokenizer → scorer → normalizer → decision over a shared
//! [`Lexicon`]. Stateless apart from the lexicon, which is never mutated,
//! so one [`EmotionClassifier`] can serve any number of threads.

use crate::classifier::Classifier;
use crate::config::ScoringConfig;
use crate::decision::decide;
use crate::lexicon::{Lexicon, SharedLexicon};
use crate::normalize::aggregate;
use crate::scorer::score_category;
use crate::tokenizer::tokenize;
use sentiment_shield_core::{ClassificationResult, Result};
use tracing::{debug, trace};

/// Classify `text` against `lexicon`.
pub fn classify(text: &str, lexicon: &Lexicon, config: &ScoringConfig) -> ClassificationResult {
    let excerpt: String = text.chars().take(config.excerpt_chars).collect();

    if text.trim().chars().count() < config.min_text_chars {
        trace!("Text below minimum length, skipping scoring");
        return ClassificationResult::neutral(excerpt);
    }

    let tokens = tokenize(text);

    let raw_scores = lexicon.iter().map(|entry| {
        let raw = score_category(&tokens, text, entry, lexicon, config);
        trace!(category = %entry.category(), raw, "Scored category");
        (entry.category(), raw, entry.weight())
    });
    let (scores, total_score) = aggregate(raw_scores, tokens.len(), config);

    let decision = decide(&scores, total_score, config);

    debug!(
        tokens = tokens.len(),
        total_score,
        dominant = ?decision.dominant_category,
        sentiment = ?decision.sentiment,
        "Classified text"
    );

    ClassificationResult {
        sentiment: decision.sentiment,
        scores,
        dominant_category: decision.dominant_category,
        dominant_score: decision.dominant_score,
        total_score,
        confidence: decision.confidence,
        excerpt,
    }
}

/// Lexicon-based negative emotion classifier
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    name: String,
    lexicon: SharedLexicon,
    config: ScoringConfig,
}

impl EmotionClassifier {
    /// Create a classifier over the built-in lexicon with default scoring
    pub fn new() -> Result<Self> {
        Ok(Self::with_lexicon(Lexicon::shared()?))
    }

    /// Create a classifier over an already compiled lexicon
    pub fn with_lexicon(lexicon: SharedLexicon) -> Self {
        Self {
            name: "emotion".to_string(),
            lexicon,
            config: ScoringConfig::default(),
        }
    }

    /// Replace the scoring parameters after validating them
    pub fn with_config(mut self, config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}

impl Classifier for EmotionClassifier {
    fn classify(&self, text: &str) -> ClassificationResult {
        classify(text, &self.lexicon, &self.config)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_shield_core::{Category, Sentiment};

    fn classifier() -> EmotionClassifier {
        EmotionClassifier::new().unwrap()
    }

    #[test]
    fn test_short_input_short_circuits() {
        let c = classifier();
        for text in ["", "    ", "mad", " rage ", "\tkill\n"] {
            let result = c.classify(text);
            assert_eq!(result.sentiment, Sentiment::Neutral);
            assert_eq!(result.total_score, 0.0);
            assert_eq!(result.dominant_category, None);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn test_five_chars_is_scored() {
        let result = classifier().classify("angry");
        assert_eq!(result.dominant_category, Some(Category::Anger));
        assert_eq!(result.score(Category::Anger), 1.0);
    }

    #[test]
    fn test_anger_example() {
        let result = classifier().classify("I am angry");
        assert_eq!(result.score(Category::Anger), 1.0);
        assert_eq!(result.total_score, 1.0);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.dominant_category, Some(Category::Anger));
    }

    #[test]
    fn test_negated_text_is_neutral() {
        let result = classifier().classify("I am not angry");
        assert_eq!(result.score(Category::Anger), 0.0);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.dominant_category, None);
    }

    #[test]
    fn test_toxic_pattern() {
        let result = classifier().classify("you should kill yourself");
        assert_eq!(result.dominant_category, Some(Category::Toxic));
        assert_eq!(result.score(Category::Toxic), 3.0);
        // "kill" is also an anger word
        assert_eq!(result.score(Category::Anger), 1.0);
        assert_eq!(result.total_score, 4.0);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_word_in_two_categories() {
        let result = classifier().classify("there is a threat");
        assert_eq!(result.score(Category::Toxic), 1.5);
        assert_eq!(result.score(Category::Fear), 0.8);
        assert_eq!(result.dominant_category, Some(Category::Toxic));
    }

    #[test]
    fn test_excerpt_is_truncated_by_chars() {
        let text = "é".repeat(150);
        let result = classifier().classify(&text);
        assert_eq!(result.excerpt.chars().count(), 100);

        let short = classifier().classify("hi");
        assert_eq!(short.excerpt, "hi");
    }

    #[test]
    fn test_with_config_validates() {
        let bad = ScoringConfig {
            length_divisor: -1.0,
            ..Default::default()
        };
        assert!(classifier().with_config(bad).is_err());
    }

    #[test]
    fn test_threshold_override() {
        let config = ScoringConfig {
            sentiment_threshold: 2.0,
            ..Default::default()
        };
        let c = classifier().with_config(config).unwrap();
        let result = c.classify("I am angry");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.dominant_category, Some(Category::Anger));
    }

    #[test]
    fn test_name() {
        assert_eq!(classifier().name(), "emotion");
        assert_eq!(classifier().with_name("shield").name(), "shield");
    }
}
