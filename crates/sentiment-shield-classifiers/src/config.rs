//! Tunable scoring parameters
//!
//! Defaults are the empirically chosen values the engine ships with.
//! Overrides come from the host configuration file; [`ScoringConfig::validate`]
//! rejects values that would break the result invariants.

use sentiment_shield_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Constants used by the scorer, normalizer and decision stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Contribution of a trigger word with no context
    pub base_contribution: f64,

    /// Contribution of a negated trigger word
    pub negation_penalty: f64,

    /// Multiplier applied to the base contribution after an intensifier
    pub intensifier_multiplier: f64,

    /// Bonus per matching pattern
    pub pattern_bonus: f64,

    /// Number of preceding tokens scanned for negation words
    pub negation_window: usize,

    /// Number of preceding tokens scanned for intensifiers
    pub intensifier_window: usize,

    /// Tokens per unit of the length divisor
    pub length_divisor: f64,

    /// Total score above which a text is negative
    pub sentiment_threshold: f64,

    /// Trimmed texts shorter than this are neutral without scoring
    pub min_text_chars: usize,

    /// Maximum characters copied into the result excerpt
    pub excerpt_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_contribution: 1.0,
            negation_penalty: -0.3,
            intensifier_multiplier: 1.5,
            pattern_bonus: 2.0,
            negation_window: 3,
            intensifier_window: 1,
            length_divisor: 10.0,
            sentiment_threshold: 0.15,
            min_text_chars: 5,
            excerpt_chars: 100,
        }
    }
}

impl ScoringConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("base_contribution", self.base_contribution),
            ("negation_penalty", self.negation_penalty),
            ("intensifier_multiplier", self.intensifier_multiplier),
            ("pattern_bonus", self.pattern_bonus),
            ("length_divisor", self.length_divisor),
            ("sentiment_threshold", self.sentiment_threshold),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::config(format!("scoring.{name} must be finite, got {value}")));
        }

        if self.length_divisor <= 0.0 {
            return Err(Error::config(format!(
                "scoring.length_divisor must be positive, got {}",
                self.length_divisor
            )));
        }

        if self.sentiment_threshold < 0.0 {
            return Err(Error::config(format!(
                "scoring.sentiment_threshold must not be negative, got {}",
                self.sentiment_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScoringConfig::default();
        config.validate().unwrap();
        assert_eq!(config.negation_penalty, -0.3);
        assert_eq!(config.intensifier_multiplier, 1.5);
        assert_eq!(config.pattern_bonus, 2.0);
        assert_eq!(config.negation_window, 3);
        assert_eq!(config.intensifier_window, 1);
        assert_eq!(config.sentiment_threshold, 0.15);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ScoringConfig = serde_yaml::from_str("pattern_bonus: 3.0\n").unwrap();
        assert_eq!(config.pattern_bonus, 3.0);
        assert_eq!(config.negation_window, 3);
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let config = ScoringConfig {
            length_divisor: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = ScoringConfig {
            pattern_bonus: f64::NAN,
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("pattern_bonus"));
    }
}
