//! Core types for Sentiment Shield

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Emotion category scored by the engine.
///
/// The variant order is the declaration order used to break ties between
/// equal scores: the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anger,
    Sadness,
    Toxic,
    Fear,
    Spam,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 5;

    /// All categories in declaration order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Anger,
        Category::Sadness,
        Category::Toxic,
        Category::Fear,
        Category::Spam,
    ];

    /// Position of this category in declaration order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used in configuration and output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Sadness => "sadness",
            Self::Toxic => "toxic",
            Self::Fear => "fear",
            Self::Spam => "spam",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown category '{s}'")))
    }
}

/// Overall sentiment of a classified text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }
}

/// Score per category. Every category always has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores([f64; Category::COUNT]);

impl CategoryScores {
    /// All scores zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Score for a category
    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    /// Set the score for a category
    pub fn set(&mut self, category: Category, score: f64) {
        self.0[category.index()] = score;
    }

    /// Iterate `(category, score)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Serialize for CategoryScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.as_str(), &score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = CategoryScores;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = CategoryScores::zero();
                while let Some((category, score)) = access.next_entry::<Category, f64>()? {
                    scores.set(category, score);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Result of classifying one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Negative when the total score exceeds the sentiment threshold
    pub sentiment: Sentiment,

    /// Normalized, non-negative score per category
    pub scores: CategoryScores,

    /// Highest-scoring category; present iff `total_score > 0`
    pub dominant_category: Option<Category>,

    /// Score of the dominant category (0 when there is none)
    pub dominant_score: f64,

    /// Sum of all category scores
    pub total_score: f64,

    /// `min(1, total_score / 2)`
    pub confidence: f64,

    /// First characters of the source text
    pub excerpt: String,
}

impl ClassificationResult {
    /// Neutral result with all scores zero
    pub fn neutral(excerpt: impl Into<String>) -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            scores: CategoryScores::zero(),
            dominant_category: None,
            dominant_score: 0.0,
            total_score: 0.0,
            confidence: 0.0,
            excerpt: excerpt.into(),
        }
    }

    /// Score for a single category
    pub fn score(&self, category: Category) -> f64 {
        self.scores.get(category)
    }

    pub fn is_negative(&self) -> bool {
        self.sentiment.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_and_index() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        assert!(Category::Anger < Category::Spam);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Toxic".parse::<Category>().unwrap(), Category::Toxic);
        assert_eq!(" fear ".parse::<Category>().unwrap(), Category::Fear);
        assert!("joy".parse::<Category>().is_err());
    }

    #[test]
    fn test_scores_serialize_every_category() {
        let mut scores = CategoryScores::zero();
        scores.set(Category::Toxic, 1.5);

        let json = serde_json::to_value(scores).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), Category::COUNT);
        assert_eq!(obj["toxic"], 1.5);
        assert_eq!(obj["anger"], 0.0);
    }

    #[test]
    fn test_scores_deserialize_partial_map() {
        let scores: CategoryScores = serde_json::from_str(r#"{"fear": 0.4}"#).unwrap();
        assert_eq!(scores.get(Category::Fear), 0.4);
        assert_eq!(scores.get(Category::Anger), 0.0);
        assert_eq!(scores.total(), 0.4);
    }

    #[test]
    fn test_neutral_result() {
        let result = ClassificationResult::neutral("hi");
        assert!(!result.is_negative());
        assert_eq!(result.dominant_category, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.excerpt, "hi");
    }
}
