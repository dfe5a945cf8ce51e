//! Classifier trait

use sentiment_shield_core::ClassificationResult;

/// Trait for all classifiers.
///
/// Classification is synchronous and infallible: every input, including
/// empty text, maps to a result.
pub trait Classifier: Send + Sync {
    /// Classify the given text
    fn classify(&self, text: &str) -> ClassificationResult;

    /// Get the classifier name
    fn name(&self) -> &str;
}
