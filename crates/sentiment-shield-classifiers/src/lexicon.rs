//! Lexicon store
//!
//! A [`LexiconSpec`] is the declarative form (built in, or read from YAML).
//! [`Lexicon`] is the compiled, immutable form the scorer reads: word sets,
//! compiled patterns and weights, one entry per [`Category`]. Compilation
//! validates everything up front so a broken entry fails at startup
//! instead of silently dropping a category.

use crate::builtin::{self, INTENSIFIER_WORDS, NEGATION_WORDS};
use regex::{Regex, RegexBuilder};
use sentiment_shield_core::{Category, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Lexicon shared across threads
pub type SharedLexicon = Arc<Lexicon>;

/// Declarative lexicon, one entry per category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconSpec {
    pub categories: BTreeMap<Category, CategorySpec>,

    #[serde(default = "default_negations")]
    pub negations: Vec<String>,

    #[serde(default = "default_intensifiers")]
    pub intensifiers: Vec<String>,
}

/// Declarative entry for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    #[serde(default)]
    pub words: Vec<String>,

    #[serde(default)]
    pub patterns: Vec<PatternSpec>,

    pub weight: f64,
}

/// A text-level pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSpec {
    pub regex: String,

    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

fn default_negations() -> Vec<String> {
    NEGATION_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_intensifiers() -> Vec<String> {
    INTENSIFIER_WORDS.iter().map(|w| w.to_string()).collect()
}

impl LexiconSpec {
    /// Parse a lexicon from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a lexicon from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::lexicon(format!("failed to read lexicon {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }
}

/// Compiled entry for one category
#[derive(Debug)]
pub struct CategoryLexicon {
    category: Category,
    words: HashSet<String>,
    patterns: Vec<Regex>,
    weight: f64,
}

impl CategoryLexicon {
    fn compile(category: Category, spec: &CategorySpec) -> Result<Self> {
        if !spec.weight.is_finite() || spec.weight <= 0.0 {
            return Err(Error::lexicon(format!(
                "category '{category}' has invalid weight {}",
                spec.weight
            )));
        }

        let words = spec
            .words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let patterns = spec
            .patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(&p.regex)
                    .case_insensitive(p.case_insensitive)
                    .build()
                    .map_err(|e| {
                        Error::lexicon(format!(
                            "category '{category}' pattern '{}' failed to compile: {e}",
                            p.regex
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category,
            words,
            patterns,
            weight: spec.weight,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Exact match against the trigger vocabulary
    pub fn contains_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Immutable lexicon for all categories
#[derive(Debug)]
pub struct Lexicon {
    // indexed by Category::index()
    entries: Vec<CategoryLexicon>,
    negations: HashSet<String>,
    intensifiers: HashSet<String>,
}

impl Lexicon {
    /// Compile the built-in lexicon
    pub fn builtin() -> Result<Self> {
        Self::from_spec(&builtin::builtin_spec())
    }

    /// Compile the built-in lexicon behind an `Arc`
    pub fn shared() -> Result<SharedLexicon> {
        Ok(Arc::new(Self::builtin()?))
    }

    /// Compile and validate a specification
    pub fn from_spec(spec: &LexiconSpec) -> Result<Self> {
        let entries = Category::ALL
            .into_iter()
            .map(|category| -> Result<CategoryLexicon> {
                let entry = spec.categories.get(&category).ok_or_else(|| {
                    Error::lexicon(format!("category '{category}' is missing from the lexicon"))
                })?;
                let compiled = CategoryLexicon::compile(category, entry)?;
                debug!(
                    category = %category,
                    words = compiled.word_count(),
                    patterns = compiled.patterns.len(),
                    weight = compiled.weight,
                    "Compiled lexicon entry"
                );
                Ok(compiled)
            })
            .collect::<Result<Vec<_>>>()?;

        let lexicon = Self {
            entries,
            negations: normalize_words(&spec.negations),
            intensifiers: normalize_words(&spec.intensifiers),
        };

        info!(
            categories = lexicon.entries.len(),
            negations = lexicon.negations.len(),
            intensifiers = lexicon.intensifiers.len(),
            "Lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Compile a lexicon read from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_spec(&LexiconSpec::from_file(path)?)
    }

    /// Entry for a category
    pub fn entry(&self, category: Category) -> &CategoryLexicon {
        &self.entries[category.index()]
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryLexicon> {
        self.entries.iter()
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token)
    }

    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifiers.contains(token)
    }
}

fn normalize_words(words: &[String]) -> HashSet<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_every_category() {
        let lexicon = Lexicon::builtin().unwrap();
        let categories: Vec<_> = lexicon.iter().map(|e| e.category()).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_builtin_weights() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.entry(Category::Toxic).weight(), 1.5);
        assert_eq!(lexicon.entry(Category::Anger).weight(), 1.0);
        assert_eq!(lexicon.entry(Category::Sadness).weight(), 0.9);
        assert_eq!(lexicon.entry(Category::Fear).weight(), 0.8);
        assert_eq!(lexicon.entry(Category::Spam).weight(), 0.7);
    }

    #[test]
    fn test_context_words() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(lexicon.is_negation("don't"));
        assert!(lexicon.is_negation("never"));
        assert!(!lexicon.is_negation("angry"));
        assert!(lexicon.is_intensifier("extremely"));
        assert!(!lexicon.is_intensifier("not"));
    }

    #[test]
    fn test_caps_pattern_is_case_sensitive() {
        let lexicon = Lexicon::builtin().unwrap();
        let caps = lexicon
            .entry(Category::Anger)
            .patterns()
            .iter()
            .find(|p| p.as_str() == "[A-Z]{4,}")
            .unwrap();
        assert!(caps.is_match("this is RAGE"));
        assert!(!caps.is_match("this is rage"));
    }

    #[test]
    fn test_case_insensitive_pattern() {
        let lexicon = Lexicon::builtin().unwrap();
        let hits = lexicon
            .entry(Category::Anger)
            .patterns()
            .iter()
            .filter(|p| p.is_match("WtF is this"))
            .count();
        assert!(hits >= 1);
    }

    #[test]
    fn test_missing_category_fails() {
        let mut spec = builtin::builtin_spec();
        spec.categories.remove(&Category::Fear);

        let err = Lexicon::from_spec(&spec).unwrap_err();
        assert!(matches!(err, Error::Lexicon(_)));
        assert!(err.to_string().contains("fear"));
    }

    #[test]
    fn test_bad_pattern_fails_fast() {
        let mut spec = builtin::builtin_spec();
        spec.categories
            .get_mut(&Category::Spam)
            .unwrap()
            .patterns
            .push(PatternSpec {
                regex: "(unclosed".to_string(),
                case_insensitive: true,
            });

        let err = Lexicon::from_spec(&spec).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_invalid_weight_fails() {
        let mut spec = builtin::builtin_spec();
        spec.categories.get_mut(&Category::Anger).unwrap().weight = 0.0;
        assert!(Lexicon::from_spec(&spec).is_err());
    }

    #[test]
    fn test_yaml_lexicon() {
        let yaml = r#"
categories:
  anger:
    weight: 2.0
    words: [Grr]
    patterns:
      - regex: 'ARGH'
        case_insensitive: false
  sadness: { weight: 1.0 }
  toxic: { weight: 1.0 }
  fear: { weight: 1.0 }
  spam: { weight: 1.0 }
"#;
        let lexicon = Lexicon::from_spec(&LexiconSpec::from_yaml(yaml).unwrap()).unwrap();
        let anger = lexicon.entry(Category::Anger);
        assert!(anger.contains_word("grr"));
        assert_eq!(anger.weight(), 2.0);
        assert!(!anger.patterns()[0].is_match("argh"));
        // context words fall back to the built-in sets
        assert!(lexicon.is_negation("not"));
    }

    #[test]
    fn test_yaml_unknown_category_rejected() {
        let yaml = "categories:\n  joy: { weight: 1.0 }\n";
        assert!(LexiconSpec::from_yaml(yaml).is_err());
    }
}
