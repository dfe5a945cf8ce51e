//! Per-category raw scoring
//!
//! Each trigger word contributes according to its left context:
//! - a negation word within `negation_window` tokens before it turns the
//!   contribution into `negation_penalty`
//! - otherwise an intensifier within `intensifier_window` tokens before it
//!   multiplies the base contribution by `intensifier_multiplier`
//!
//! Every pattern that matches the untokenized text adds `pattern_bonus`.
//! The raw score may be negative; flooring happens during normalization.

use crate::config::ScoringConfig;
use crate::lexicon::{CategoryLexicon, Lexicon};
use crate::tokenizer::Token;

/// Raw score for one category over a tokenized text.
///
/// `text` is the untokenized input, used for pattern matching.
pub fn score_category(
    tokens: &[Token],
    text: &str,
    entry: &CategoryLexicon,
    lexicon: &Lexicon,
    config: &ScoringConfig,
) -> f64 {
    let mut raw = 0.0;

    for (i, token) in tokens.iter().enumerate() {
        if entry.contains_word(token.as_str()) {
            raw += word_contribution(tokens, i, lexicon, config);
        }
    }

    for pattern in entry.patterns() {
        if pattern.is_match(text) {
            raw += config.pattern_bonus;
        }
    }

    raw
}

/// Contribution of the trigger word at position `i`
pub fn word_contribution(
    tokens: &[Token],
    i: usize,
    lexicon: &Lexicon,
    config: &ScoringConfig,
) -> f64 {
    let negation_start = i.saturating_sub(config.negation_window);
    let negated = tokens[negation_start..i]
        .iter()
        .any(|t| lexicon.is_negation(t.as_str()));
    if negated {
        return config.negation_penalty;
    }

    let intensifier_start = i.saturating_sub(config.intensifier_window);
    let intensified = tokens[intensifier_start..i]
        .iter()
        .any(|t| lexicon.is_intensifier(t.as_str()));
    if intensified {
        config.base_contribution * config.intensifier_multiplier
    } else {
        config.base_contribution
    }
}
