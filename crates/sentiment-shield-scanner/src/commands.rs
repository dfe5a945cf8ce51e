//! Command implementations behind the `sentiment-shield` binary
//!
//! Each command writes its output to the given writer so the binary can
//! point it at stdout and tests can capture it.

use crate::cli::SettingsAction;
use crate::config::AppConfig;
use crate::content::ContentBlock;
use crate::notice::BlockNotice;
use crate::scanner::{ScanReport, Scanner};
use crate::store::StateStore;
use crate::watcher::{self, HostEvent};
use anyhow::{Context, Result};
use sentiment_shield_classifiers::{Classifier, EmotionClassifier, Lexicon};
use sentiment_shield_core::ClassificationResult;
use sentiment_shield_policy::{AllowReason, PolicyFilter, Settings, SettingsUpdate, Verdict};
use sentiment_shield_telemetry::StatsSnapshot;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the classifier described by the configuration
pub fn build_classifier(config: &AppConfig) -> Result<EmotionClassifier> {
    let lexicon = match &config.lexicon_path {
        Some(path) => Arc::new(
            Lexicon::from_file(path)
                .with_context(|| format!("Failed to load lexicon from {}", path.display()))?,
        ),
        None => Lexicon::shared()?,
    };

    let classifier = EmotionClassifier::with_lexicon(lexicon).with_config(config.scoring.clone())?;
    Ok(classifier)
}

/// Open the scanner over the configured state file
pub fn open_scanner(config: &AppConfig) -> Result<Scanner> {
    let classifier = build_classifier(config)?;
    let store = StateStore::new(&config.state_path);
    Scanner::open(Arc::new(classifier), store, config.scan.clone())
        .with_context(|| format!("Failed to open state at {}", config.state_path.display()))
}

/// Classification result with the policy verdict under current settings
#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    #[serde(flatten)]
    pub result: ClassificationResult,

    pub blocked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<BlockNotice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_by: Option<AllowReason>,
}

impl ClassifyOutput {
    fn new(result: ClassificationResult, verdict: Verdict) -> Self {
        let (notice, allowed_by) = match verdict {
            Verdict::Block { category, confidence, .. } => {
                (Some(BlockNotice::new(category, confidence)), None)
            }
            Verdict::Allowed(reason) => (None, Some(reason)),
            Verdict::Pass => (None, None),
        };

        Self {
            blocked: notice.is_some(),
            result,
            notice,
            allowed_by,
        }
    }
}

/// `classify`: one text, no counters touched
pub fn classify(
    config: &AppConfig,
    text: &str,
    author: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<ClassifyOutput> {
    let classifier = build_classifier(config)?;
    let settings = StateStore::new(&config.state_path).load()?.settings;
    let filter = PolicyFilter::with_threshold(settings, config.scan.block_threshold)?;

    let result = classifier.classify(text);
    let verdict = filter.evaluate(text, author, &result);
    let output = ClassifyOutput::new(result, verdict);

    if json {
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
    } else {
        write_classification(&output, out)?;
    }
    Ok(output)
}

fn write_classification(output: &ClassifyOutput, out: &mut impl Write) -> Result<()> {
    let result = &output.result;
    writeln!(out, "Sentiment:  {:?}", result.sentiment)?;
    match result.dominant_category {
        Some(category) => writeln!(out, "Dominant:   {category} ({:.2})", result.dominant_score)?,
        None => writeln!(out, "Dominant:   none")?,
    }
    writeln!(out, "Total:      {:.2}", result.total_score)?;
    writeln!(out, "Confidence: {:.0}%", result.confidence * 100.0)?;

    let scores: Vec<String> = result
        .scores
        .iter()
        .map(|(category, score)| format!("{category}={score:.2}"))
        .collect();
    writeln!(out, "Scores:     {}", scores.join(" "))?;

    if let Some(notice) = &output.notice {
        writeln!(out, "Verdict:    hidden ({}, {}% confidence)", notice.label, notice.confidence_percent)?;
    } else if let Some(reason) = &output.allowed_by {
        writeln!(out, "Verdict:    allowed ({reason:?})")?;
    } else {
        writeln!(out, "Verdict:    visible")?;
    }
    Ok(())
}

/// `scan`: process JSON-lines content blocks in one pass
pub fn scan(scanner: &mut Scanner, input: impl BufRead, out: &mut impl Write) -> Result<Vec<ScanReport>> {
    let mut reports = Vec::new();

    for (n, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let block: ContentBlock = match serde_json::from_str(&line) {
            Ok(block) => block,
            Err(e) => {
                warn!(line = n + 1, error = %e, "Skipping malformed content block");
                continue;
            }
        };

        let report = ScanReport {
            id: block.id.clone(),
            outcome: scanner.process(&block),
        };
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
        reports.push(report);
    }

    scanner.persist();
    let stats = scanner.stats().snapshot();
    info!(
        analyzed = stats.analyzed,
        blocked = stats.blocked,
        "Scan finished"
    );
    Ok(reports)
}

/// `scan --watch`: host events as JSON lines through the debounced loop.
///
/// `input` is read on a dedicated thread; end of input or Ctrl-C shuts the
/// loop down after buffered content is flushed.
pub async fn watch(
    scanner: Scanner,
    input: impl BufRead + Send + 'static,
    out: &mut impl Write,
) -> Result<Scanner> {
    let debounce = scanner.config().debounce();
    let mut handle = watcher::spawn(scanner, debounce, 256);
    let events = handle.sender();
    let interrupt = handle.sender();

    std::thread::spawn(move || {
        for (n, line) in input.lines().enumerate() {
            let line = match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            };

            match serde_json::from_str::<HostEvent>(&line) {
                Ok(event) => {
                    let stop = event == HostEvent::Shutdown;
                    if events.blocking_send(event).is_err() || stop {
                        return;
                    }
                }
                Err(e) => warn!(line = n + 1, error = %e, "Skipping malformed event"),
            }
        }
        let _ = events.blocking_send(HostEvent::Shutdown);
    });

    let mut interrupted = false;
    loop {
        tokio::select! {
            report = handle.recv() => match report {
                Some(report) => {
                    serde_json::to_writer(&mut *out, &report)?;
                    writeln!(out)?;
                    out.flush()?;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                info!("Interrupted, shutting down");
                interrupted = true;
                let _ = interrupt.send(HostEvent::Shutdown).await;
            }
        }
    }

    let scanner = handle.shutdown().await.context("Watcher task failed")?;
    Ok(scanner)
}

/// `stats`
pub fn stats(scanner: &mut Scanner, reset: bool, json: bool, out: &mut impl Write) -> Result<StatsSnapshot> {
    if reset {
        scanner.reset_stats();
    }

    let snapshot = scanner.stats().snapshot();
    if json {
        let value = serde_json::json!({
            "analyzed": snapshot.analyzed,
            "blocked": snapshot.blocked,
            "blockRate": snapshot.block_rate_percent(),
        });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Analyzed:   {}", snapshot.analyzed)?;
        writeln!(out, "Blocked:    {}", snapshot.blocked)?;
        writeln!(out, "Block rate: {}%", snapshot.block_rate_percent())?;
    }
    Ok(snapshot)
}

/// `settings`: apply `action` and print the resulting settings
pub fn settings(
    scanner: &mut Scanner,
    action: Option<SettingsAction>,
    out: &mut impl Write,
) -> Result<Settings> {
    if let Some(update) = settings_update(scanner.settings(), action)? {
        scanner.apply_settings(&update)?;
    }

    serde_json::to_writer_pretty(&mut *out, scanner.settings())?;
    writeln!(out)?;
    Ok(scanner.settings().clone())
}

/// Translate a settings action into an update against `current`
pub fn settings_update(
    current: &Settings,
    action: Option<SettingsAction>,
) -> Result<Option<SettingsUpdate>> {
    let update = match action.unwrap_or(SettingsAction::Show) {
        SettingsAction::Show => return Ok(None),
        SettingsAction::Block { category } => SettingsUpdate::block(category, true),
        SettingsAction::Unblock { category } => SettingsUpdate::block(category, false),
        SettingsAction::Enable => SettingsUpdate::enabled(true),
        SettingsAction::Disable => SettingsUpdate::enabled(false),
        SettingsAction::AllowUser { user } => {
            let mut whitelist = current.whitelist.clone();
            if !whitelist.add_user(&user)? {
                info!(user = %user, "User already allow-listed");
            }
            SettingsUpdate::whitelist(whitelist)
        }
        SettingsAction::RemoveUser { user } => {
            let mut whitelist = current.whitelist.clone();
            if !whitelist.remove_user(&user) {
                info!(user = %user, "User was not allow-listed");
            }
            SettingsUpdate::whitelist(whitelist)
        }
        SettingsAction::AllowKeyword { keyword } => {
            let mut whitelist = current.whitelist.clone();
            if !whitelist.add_keyword(&keyword)? {
                info!(keyword = %keyword, "Keyword already allow-listed");
            }
            SettingsUpdate::whitelist(whitelist)
        }
        SettingsAction::RemoveKeyword { keyword } => {
            let mut whitelist = current.whitelist.clone();
            if !whitelist.remove_keyword(&keyword) {
                info!(keyword = %keyword, "Keyword was not allow-listed");
            }
            SettingsUpdate::whitelist(whitelist)
        }
    };
    Ok(Some(update))
}
