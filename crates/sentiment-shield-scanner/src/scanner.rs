//! Content scanner
//!
//! Takes content blocks from the host, decides which ones to classify,
//! applies the policy and keeps track of what is currently hidden.
//!
//! Per block, in order:
//! 1. nothing happens while the shield is disabled
//! 2. an id already seen with the same text is skipped
//! 3. text shorter than `min_text_chars` is skipped
//! 4. allow-listed authors and keywords are skipped before classification
//! 5. otherwise the block is classified, counted and possibly blocked

use crate::config::ScanConfig;
use crate::content::ContentBlock;
use crate::notice::BlockNotice;
use crate::store::{PersistedState, StateStore};
use sentiment_shield_classifiers::Classifier;
use sentiment_shield_core::{Category, ClassificationResult, Result};
use sentiment_shield_policy::{AllowReason, PolicyFilter, Settings, SettingsUpdate};
use sentiment_shield_telemetry::StatsCollector;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What happened to one content block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Shield is turned off
    Disabled,

    /// Same id and text were already processed
    Duplicate,

    /// Text too short to be worth classifying
    TooShort,

    /// Allow-listed, never classified
    Allowed { reason: AllowReason },

    /// Classified and left visible
    Passed { result: ClassificationResult },

    /// Classified and hidden
    Blocked {
        notice: BlockNotice,
        result: ClassificationResult,
    },
}

impl ScanOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    fn skip_reason(&self) -> Option<&'static str> {
        match self {
            Self::Disabled => Some("disabled"),
            Self::Duplicate => Some("duplicate"),
            Self::TooShort => Some("too_short"),
            Self::Allowed { .. } => Some("allowed"),
            Self::Passed { .. } | Self::Blocked { .. } => None,
        }
    }
}

/// Outcome for a block, tagged with its id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub id: String,

    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

/// Stateful scanner over a stream of content blocks
pub struct Scanner {
    classifier: Arc<dyn Classifier>,
    filter: PolicyFilter,
    stats: StatsCollector,
    config: ScanConfig,
    /// id → fingerprint of the last processed text
    seen: HashMap<String, String>,
    /// id → category of currently hidden blocks
    active_blocks: BTreeMap<String, Category>,
    store: Option<StateStore>,
}

impl Scanner {
    /// Create a scanner without persistence
    pub fn new(
        classifier: Arc<dyn Classifier>,
        settings: Settings,
        stats: StatsCollector,
        config: ScanConfig,
    ) -> Result<Self> {
        config.validate()?;
        let filter = PolicyFilter::with_threshold(settings, config.block_threshold)?;
        Ok(Self {
            classifier,
            filter,
            stats,
            config,
            seen: HashMap::new(),
            active_blocks: BTreeMap::new(),
            store: None,
        })
    }

    /// Create a scanner resuming from, and persisting to, `store`
    pub fn open(classifier: Arc<dyn Classifier>, store: StateStore, config: ScanConfig) -> Result<Self> {
        let state = store.load()?;
        let stats = StatsCollector::from_snapshot(state.stats);
        let mut scanner = Self::new(classifier, state.settings, stats, config)?;
        scanner.store = Some(store);
        Ok(scanner)
    }

    pub fn settings(&self) -> &Settings {
        self.filter.settings()
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Whether `id` is currently hidden
    pub fn is_blocked(&self, id: &str) -> bool {
        self.active_blocks.contains_key(id)
    }

    /// Currently hidden blocks in id order
    pub fn active_blocks(&self) -> impl Iterator<Item = (&str, Category)> + '_ {
        self.active_blocks.iter().map(|(id, c)| (id.as_str(), *c))
    }

    /// Snapshot of what the store would hold
    pub fn state(&self) -> PersistedState {
        PersistedState {
            settings: self.settings().clone(),
            stats: self.stats.snapshot(),
        }
    }

    /// Process one block
    pub fn process(&mut self, block: &ContentBlock) -> ScanOutcome {
        let outcome = self.process_inner(block);
        if let Some(reason) = outcome.skip_reason() {
            metrics::counter!("sentiment_shield_skipped_total", "reason" => reason).increment(1);
            debug!(id = %block.id, reason, "Block skipped");
        }
        outcome
    }

    /// Process a batch, in order
    pub fn process_all<'a>(
        &mut self,
        blocks: impl IntoIterator<Item = &'a ContentBlock>,
    ) -> Vec<ScanReport> {
        blocks
            .into_iter()
            .map(|block| ScanReport {
                id: block.id.clone(),
                outcome: self.process(block),
            })
            .collect()
    }

    fn process_inner(&mut self, block: &ContentBlock) -> ScanOutcome {
        if !self.settings().enabled {
            return ScanOutcome::Disabled;
        }

        let block = block.normalized(self.config.max_text_chars);
        let fingerprint = block.fingerprint();
        match self.seen.insert(block.id.clone(), fingerprint.clone()) {
            Some(previous) if previous == fingerprint => return ScanOutcome::Duplicate,
            Some(_) => {
                if self.active_blocks.remove(&block.id).is_some() {
                    debug!(id = %block.id, "Content edited, dropping stale block");
                }
            }
            None => {}
        }

        if block.text.chars().count() < self.config.min_text_chars {
            return ScanOutcome::TooShort;
        }

        if let Some(reason) = self.filter.allow_list_match(&block.text, &block.author) {
            return ScanOutcome::Allowed { reason };
        }

        let started = Instant::now();
        let result = self.classifier.classify(&block.text);
        let analyzed = self.stats.record_analyzed(started.elapsed());

        match self.filter.should_block(&result) {
            Some(category) => {
                self.stats.record_blocked(category);
                self.active_blocks.insert(block.id.clone(), category);
                info!(
                    id = %block.id,
                    category = %category,
                    score = result.dominant_score,
                    confidence = result.confidence,
                    "Content blocked"
                );
                self.persist();
                ScanOutcome::Blocked {
                    notice: BlockNotice::new(category, result.confidence),
                    result,
                }
            }
            None => {
                if analyzed % self.config.persist_every == 0 {
                    self.persist();
                }
                ScanOutcome::Passed { result }
            }
        }
    }

    /// Apply a runtime settings change.
    ///
    /// Disabling reveals everything currently hidden without touching the
    /// counters. Processed ids are kept, so unchanged blocks stay skipped
    /// after re-enabling.
    pub fn apply_settings(&mut self, update: &SettingsUpdate) -> Result<()> {
        let mut settings = self.settings().clone();
        settings.apply(update);
        self.filter = PolicyFilter::with_threshold(settings, self.config.block_threshold)?;

        if !self.settings().enabled {
            let cleared = self.active_blocks.len();
            self.active_blocks.clear();
            info!(cleared, "Shield disabled, active blocks cleared");
        }

        self.persist();
        Ok(())
    }

    /// Reveal a hidden block; returns `false` when `id` was not blocked
    pub fn reveal(&mut self, id: &str) -> bool {
        if self.active_blocks.remove(id).is_none() {
            return false;
        }
        let blocked = self.stats.record_revealed();
        info!(id, blocked, "Content revealed");
        self.persist();
        true
    }

    /// Drop everything known about `id` once the host no longer shows it.
    ///
    /// Counters are untouched. Returns `false` when `id` was never processed.
    pub fn forget(&mut self, id: &str) -> bool {
        self.active_blocks.remove(id);
        let known = self.seen.remove(id).is_some();
        if known {
            debug!(id, tracked = self.seen.len(), "Block forgotten");
        }
        known
    }

    /// Number of ids with a remembered fingerprint
    pub fn tracked(&self) -> usize {
        self.seen.len()
    }

    /// Zero the counters and persist
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.persist();
    }

    /// Write settings and counters to the store, if any.
    ///
    /// Failures are logged; scanning carries on with in-memory state.
    pub fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.state()) {
                warn!(path = %store.path().display(), error = %e, "Failed to persist state");
            }
        }
    }
}
