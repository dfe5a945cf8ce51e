//! Debounced event loop
//!
//! Hosts push [`HostEvent`]s as the page changes. Content events arrive in
//! bursts, so they are buffered and scanned once the stream has been quiet
//! for the debounce period; every new content event restarts the wait.
//! Settings changes, reveals, forgets and shutdown are handled as soon as
//! they arrive. Buffered content is flushed before the loop exits.

use crate::content::ContentBlock;
use crate::scanner::{ScanReport, Scanner};
use sentiment_shield_policy::SettingsUpdate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Events delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// New or changed content on the page
    Content { blocks: Vec<ContentBlock> },

    /// Runtime settings change
    Settings { update: SettingsUpdate },

    /// The user asked to see a hidden block
    Reveal { id: String },

    /// Blocks that left the page; their ids are released
    Forget { ids: Vec<String> },

    /// Stop the loop
    Shutdown,
}

/// Channels and task of a running watcher
pub struct WatcherHandle {
    events: mpsc::Sender<HostEvent>,
    reports: mpsc::Receiver<ScanReport>,
    task: JoinHandle<Scanner>,
}

impl WatcherHandle {
    /// Deliver an event; fails once the loop has stopped
    pub async fn send(&self, event: HostEvent) -> Result<(), mpsc::error::SendError<HostEvent>> {
        self.events.send(event).await
    }

    /// Sender half, for hosts that feed events from another task
    pub fn sender(&self) -> mpsc::Sender<HostEvent> {
        self.events.clone()
    }

    /// Next scan report, `None` once the loop has exited and drained
    pub async fn recv(&mut self) -> Option<ScanReport> {
        self.reports.recv().await
    }

    /// Request shutdown and wait for the scanner to be handed back
    pub async fn shutdown(self) -> Result<Scanner, tokio::task::JoinError> {
        let Self { events, reports, task } = self;
        let _ = events.send(HostEvent::Shutdown).await;
        drop(events);
        drop(reports);
        task.await
    }
}

/// Spawn the loop on the current runtime
pub fn spawn(scanner: Scanner, debounce: Duration, capacity: usize) -> WatcherHandle {
    let (events_tx, events_rx) = mpsc::channel(capacity);
    let (reports_tx, reports_rx) = mpsc::channel(capacity);
    let task = tokio::spawn(run(scanner, events_rx, reports_tx, debounce));

    WatcherHandle {
        events: events_tx,
        reports: reports_rx,
        task,
    }
}

/// Run until [`HostEvent::Shutdown`] or until every sender is dropped.
///
/// Returns the scanner so its final state can be inspected.
pub async fn run(
    mut scanner: Scanner,
    mut events: mpsc::Receiver<HostEvent>,
    reports: mpsc::Sender<ScanReport>,
    debounce: Duration,
) -> Scanner {
    let mut pending: Vec<ContentBlock> = Vec::new();
    let timer = sleep(debounce);
    tokio::pin!(timer);
    let mut armed = false;

    info!(debounce_ms = debounce.as_millis() as u64, "Watcher started");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(HostEvent::Content { blocks }) => {
                    debug!(count = blocks.len(), "Content changed");
                    pending.extend(blocks);
                    timer.as_mut().reset(Instant::now() + debounce);
                    armed = true;
                }
                Some(HostEvent::Settings { update }) => {
                    if let Err(e) = scanner.apply_settings(&update) {
                        warn!(error = %e, "Rejected settings update");
                    }
                }
                Some(HostEvent::Reveal { id }) => {
                    if !scanner.reveal(&id) {
                        debug!(id = %id, "Reveal for a block that is not hidden");
                    }
                }
                Some(HostEvent::Forget { ids }) => {
                    pending.retain(|block| !ids.contains(&block.id));
                    let released = ids.iter().filter(|id| scanner.forget(id)).count();
                    debug!(requested = ids.len(), released, "Blocks forgotten");
                }
                Some(HostEvent::Shutdown) | None => break,
            },
            () = &mut timer, if armed => {
                armed = false;
                flush(&mut scanner, &mut pending, &reports).await;
            }
        }
    }

    flush(&mut scanner, &mut pending, &reports).await;
    scanner.persist();
    info!("Watcher stopped");
    scanner
}

async fn flush(
    scanner: &mut Scanner,
    pending: &mut Vec<ContentBlock>,
    reports: &mpsc::Sender<ScanReport>,
) {
    if pending.is_empty() {
        return;
    }

    let blocks = std::mem::take(pending);
    debug!(count = blocks.len(), "Scanning buffered content");
    for report in scanner.process_all(&blocks) {
        if reports.send(report).await.is_err() {
            debug!("Report receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use sentiment_shield_classifiers::EmotionClassifier;
    use sentiment_shield_policy::Settings;
    use sentiment_shield_telemetry::StatsCollector;
    use std::sync::Arc;

    const ANGRY: &str = "I am so angry and furious about this";

    fn scanner() -> Scanner {
        Scanner::new(
            Arc::new(EmotionClassifier::new().unwrap()),
            Settings::default(),
            StatsCollector::new(),
            ScanConfig::default(),
        )
        .unwrap()
    }

    fn content(id: &str, text: &str) -> HostEvent {
        HostEvent::Content {
            blocks: vec![ContentBlock::new(id, "", text)],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_content_waits_for_quiet_period() {
        let mut watcher = spawn(scanner(), Duration::from_millis(300), 16);
        let start = Instant::now();

        watcher.send(content("p1", ANGRY)).await.unwrap();
        let report = watcher.recv().await.unwrap();

        assert_eq!(report.id, "p1");
        assert!(report.outcome.is_blocked());
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_event_restarts_the_wait() {
        let mut watcher = spawn(scanner(), Duration::from_millis(300), 16);
        let start = Instant::now();

        watcher.send(content("p1", ANGRY)).await.unwrap();
        sleep(Duration::from_millis(200)).await;
        watcher.send(content("p2", "a perfectly pleasant message")).await.unwrap();

        let first = watcher.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
        let second = watcher.recv().await.unwrap();
        assert_eq!((first.id.as_str(), second.id.as_str()), ("p1", "p2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending() {
        let mut watcher = spawn(scanner(), Duration::from_secs(60), 16);
        let start = Instant::now();

        watcher.send(content("p1", ANGRY)).await.unwrap();
        watcher.send(HostEvent::Shutdown).await.unwrap();

        let report = watcher.recv().await.unwrap();
        assert!(report.outcome.is_blocked());
        assert!(start.elapsed() < Duration::from_secs(60));

        let scanner = watcher.shutdown().await.unwrap();
        assert!(scanner.is_blocked("p1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_and_reveal_apply_immediately() {
        let mut watcher = spawn(scanner(), Duration::from_millis(300), 16);

        watcher.send(content("p1", ANGRY)).await.unwrap();
        assert!(watcher.recv().await.unwrap().outcome.is_blocked());

        watcher.send(HostEvent::Reveal { id: "p1".into() }).await.unwrap();
        watcher
            .send(HostEvent::Settings {
                update: SettingsUpdate::enabled(false),
            })
            .await
            .unwrap();
        watcher.send(content("p2", ANGRY)).await.unwrap();

        let report = watcher.recv().await.unwrap();
        assert_eq!(report.id, "p2");
        assert_eq!(report.outcome, crate::scanner::ScanOutcome::Disabled);

        let scanner = watcher.shutdown().await.unwrap();
        assert!(!scanner.settings().enabled);
        assert_eq!(scanner.stats().snapshot().blocked, 0);
        assert_eq!(scanner.stats().snapshot().analyzed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forget_releases_ids_and_drops_pending() {
        let mut watcher = spawn(scanner(), Duration::from_millis(300), 16);

        watcher.send(content("p1", ANGRY)).await.unwrap();
        assert!(watcher.recv().await.unwrap().outcome.is_blocked());

        watcher.send(content("p2", ANGRY)).await.unwrap();
        watcher
            .send(HostEvent::Forget {
                ids: vec!["p1".into(), "p2".into()],
            })
            .await
            .unwrap();
        watcher.send(content("p1", ANGRY)).await.unwrap();

        let report = watcher.recv().await.unwrap();
        assert_eq!(report.id, "p1");
        assert!(report.outcome.is_blocked());

        let scanner = watcher.shutdown().await.unwrap();
        assert!(scanner.is_blocked("p1"));
        assert!(!scanner.is_blocked("p2"));
        assert_eq!(scanner.tracked(), 1);
        assert_eq!(scanner.stats().snapshot().analyzed, 2);
    }

    #[test]
    fn test_event_wire_format() {
        let events: Vec<HostEvent> = [
            r#"{"event": "content", "blocks": [{"id": "1", "author": "@bob", "text": "hello"}]}"#,
            r#"{"event": "settings", "update": {"blockedEmotions": {"fear": true}}}"#,
            r#"{"event": "reveal", "id": "1"}"#,
            r#"{"event": "shutdown"}"#,
            r#"{"event": "forget", "ids": ["1", "2"]}"#,
        ]
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

        assert_eq!(
            events[0],
            HostEvent::Content {
                blocks: vec![ContentBlock::new("1", "@bob", "hello")]
            }
        );
        assert!(matches!(&events[1], HostEvent::Settings { update } if update.blocked_emotions.is_some()));
        assert_eq!(events[2], HostEvent::Reveal { id: "1".into() });
        assert_eq!(events[3], HostEvent::Shutdown);
        assert_eq!(
            events[4],
            HostEvent::Forget {
                ids: vec!["1".into(), "2".into()]
            }
        );
    }
}
