//! Analysis and blocking counters

use sentiment_shield_core::Category;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Counter collector shared between the scanner and its host
#[derive(Clone, Default)]
pub struct StatsCollector {
    inner: Arc<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    analyzed: AtomicU64,
    blocked: AtomicU64,
}

impl StatsCollector {
    /// Create a collector starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collector resuming from persisted counts
    pub fn from_snapshot(snapshot: StatsSnapshot) -> Self {
        Self {
            inner: Arc::new(StatsInner {
                analyzed: AtomicU64::new(snapshot.analyzed),
                blocked: AtomicU64::new(snapshot.blocked),
            }),
        }
    }

    /// Record one classified block and its latency; returns the new count
    pub fn record_analyzed(&self, latency: Duration) -> u64 {
        metrics::counter!("sentiment_shield_analyzed_total").increment(1);
        metrics::histogram!("sentiment_shield_classify_latency_us")
            .record(latency.as_micros() as f64);
        self.inner.analyzed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record a block; returns the new count
    pub fn record_blocked(&self, category: Category) -> u64 {
        metrics::counter!("sentiment_shield_blocked_total", "category" => category.as_str())
            .increment(1);
        self.inner.blocked.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record a reveal; the blocked count never drops below zero
    pub fn record_revealed(&self) -> u64 {
        metrics::counter!("sentiment_shield_revealed_total").increment(1);
        let previous = self
            .inner
            .blocked
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| Some(n.saturating_sub(1)))
            .unwrap_or(0);
        let current = previous.saturating_sub(1);
        trace!(blocked = current, "Reveal recorded");
        current
    }

    /// Reset both counters to zero
    pub fn reset(&self) {
        self.inner.analyzed.store(0, Ordering::Relaxed);
        self.inner.blocked.store(0, Ordering::Relaxed);
    }

    /// Get current counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            analyzed: self.inner.analyzed.load(Ordering::Relaxed),
            blocked: self.inner.blocked.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub analyzed: u64,

    #[serde(default)]
    pub blocked: u64,
}

impl StatsSnapshot {
    /// Blocked share of analyzed content as a rounded percentage
    pub fn block_rate_percent(&self) -> u64 {
        if self.analyzed == 0 {
            0
        } else {
            (self.blocked as f64 / self.analyzed as f64 * 100.0).round() as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = StatsCollector::new();
        assert_eq!(stats.record_analyzed(Duration::from_micros(40)), 1);
        assert_eq!(stats.record_analyzed(Duration::from_micros(60)), 2);
        assert_eq!(stats.record_blocked(Category::Anger), 1);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot, StatsSnapshot { analyzed: 2, blocked: 1 });
        assert_eq!(snapshot.block_rate_percent(), 50);
    }

    #[test]
    fn test_reveal_saturates_at_zero() {
        let stats = StatsCollector::new();
        stats.record_blocked(Category::Toxic);
        assert_eq!(stats.record_revealed(), 0);
        assert_eq!(stats.record_revealed(), 0);
        assert_eq!(stats.snapshot().blocked, 0);
    }

    #[test]
    fn test_clones_share_counters() {
        let stats = StatsCollector::new();
        let other = stats.clone();
        other.record_analyzed(Duration::ZERO);
        assert_eq!(stats.snapshot().analyzed, 1);
    }

    #[test]
    fn test_resume_from_snapshot() {
        let stats = StatsCollector::from_snapshot(StatsSnapshot { analyzed: 9, blocked: 3 });
        assert_eq!(stats.record_analyzed(Duration::ZERO), 10);
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_block_rate_rounding() {
        assert_eq!(StatsSnapshot { analyzed: 0, blocked: 0 }.block_rate_percent(), 0);
        assert_eq!(StatsSnapshot { analyzed: 3, blocked: 1 }.block_rate_percent(), 33);
        assert_eq!(StatsSnapshot { analyzed: 3, blocked: 2 }.block_rate_percent(), 67);
    }

    #[test]
    fn test_snapshot_tolerates_missing_fields() {
        let snapshot: StatsSnapshot = serde_json::from_str(r#"{"blocked": 4}"#).unwrap();
        assert_eq!(snapshot, StatsSnapshot { analyzed: 0, blocked: 4 });
    }
}
