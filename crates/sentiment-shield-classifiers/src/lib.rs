//! Sentiment Shield Classifiers
//!
//! Deterministic, rule-based classification of short texts into negative
//! emotion categories (anger, sadness, toxic, fear, spam).
//!
//! The pipeline runs leaves first:
//! - [`tokenizer`]: lowercase word tokens with emphasis punctuation kept
//! - [`lexicon`]: per-category trigger words, patterns and weights
//! - [`scorer`]: raw per-category scores with negation and intensifier context
//! - [`normalize`]: weight and length normalization, floored at zero
//! - [`decision`]: dominant category, sentiment and confidence
//!
//! No model, no network, no I/O on the classification path. A [`Lexicon`]
//! is built once and shared read-only between threads.

pub mod builtin;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod emotion;
pub mod lexicon;
pub mod normalize;
pub mod scorer;
pub mod tokenizer;

pub use classifier::Classifier;
pub use config::ScoringConfig;
pub use decision::{decide, Decision};
pub use emotion::{classify, EmotionClassifier};
pub use lexicon::{CategoryLexicon, CategorySpec, Lexicon, LexiconSpec, PatternSpec, SharedLexicon};
pub use tokenizer::{tokenize, Token};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::config::ScoringConfig;
    pub use crate::emotion::EmotionClassifier;
    pub use crate::lexicon::{Lexicon, SharedLexicon};
    pub use sentiment_shield_core::{Category, ClassificationResult, Sentiment};
}
