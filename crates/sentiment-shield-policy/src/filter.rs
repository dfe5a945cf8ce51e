//! Policy filter
//!
//! Decides whether classified content should be hidden. The allow-list is
//! checked first and overrides everything; otherwise content is blocked
//! when its dominant category is blocked and scores above the threshold.

use crate::settings::{normalize_author, Settings};
use aho_corasick::AhoCorasick;
use sentiment_shield_core::{Category, ClassificationResult, Error, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Default dominant-score threshold for blocking
pub const DEFAULT_BLOCK_THRESHOLD: f64 = 0.15;

/// Why content bypassed the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entry", rename_all = "lowercase")]
pub enum AllowReason {
    /// Author contains an allow-listed user
    User(String),
    /// Text contains an allow-listed keyword
    Keyword(String),
}

/// Outcome of policy evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Allow-list override
    Allowed(AllowReason),

    /// Content stays visible
    Pass,

    /// Content should be hidden
    Block {
        category: Category,
        score: f64,
        confidence: f64,
    },
}

impl Verdict {
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block { .. })
    }
}

/// Compiled view of the current settings
pub struct PolicyFilter {
    settings: Settings,
    threshold: f64,
    users: AhoCorasick,
    user_names: Vec<String>,
    keywords: AhoCorasick,
    keyword_names: Vec<String>,
}

impl PolicyFilter {
    /// Build a filter with the default threshold
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_threshold(settings, DEFAULT_BLOCK_THRESHOLD)
    }

    /// Build a filter with a custom dominant-score threshold
    pub fn with_threshold(settings: Settings, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::policy(format!("invalid block threshold {threshold}")));
        }

        let user_names = lowercase_non_empty(&settings.whitelist.users);
        let keyword_names = lowercase_non_empty(&settings.whitelist.keywords);

        let users = AhoCorasick::new(&user_names)
            .map_err(|e| Error::policy(format!("Failed to build user allow-list matcher: {e}")))?;
        let keywords = AhoCorasick::new(&keyword_names).map_err(|e| {
            Error::policy(format!("Failed to build keyword allow-list matcher: {e}"))
        })?;

        debug!(
            users = user_names.len(),
            keywords = keyword_names.len(),
            threshold,
            "Policy filter compiled"
        );

        Ok(Self {
            settings,
            threshold,
            users,
            user_names,
            keywords,
            keyword_names,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Allow-list check: author substring match, then keyword substring
    /// match, both case-insensitive.
    pub fn allow_list_match(&self, text: &str, author: &str) -> Option<AllowReason> {
        let author = normalize_author(author);
        if let Some(m) = self.users.find(&author) {
            return Some(AllowReason::User(self.user_names[m.pattern().as_usize()].clone()));
        }

        let text = text.to_lowercase();
        self.keywords
            .find(&text)
            .map(|m| AllowReason::Keyword(self.keyword_names[m.pattern().as_usize()].clone()))
    }

    /// Whether a result should be hidden, ignoring the allow-list
    pub fn should_block(&self, result: &ClassificationResult) -> Option<Category> {
        let category = result.dominant_category?;
        (self.settings.blocked_emotions.is_blocked(category) && result.dominant_score > self.threshold)
            .then_some(category)
    }

    /// Full evaluation for a classified block
    pub fn evaluate(&self, text: &str, author: &str, result: &ClassificationResult) -> Verdict {
        if let Some(reason) = self.allow_list_match(text, author) {
            debug!(?reason, "Content allow-listed");
            return Verdict::Allowed(reason);
        }

        match self.should_block(result) {
            Some(category) => {
                info!(
                    category = %category,
                    score = result.dominant_score,
                    confidence = result.confidence,
                    "Blocking content"
                );
                Verdict::Block {
                    category,
                    score: result.dominant_score,
                    confidence: result.confidence,
                }
            }
            None => Verdict::Pass,
        }
    }
}

fn lowercase_non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}
