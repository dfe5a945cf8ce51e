//! Host configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! YAML file, then `SENTIMENT_SHIELD_*` environment variables (`__`
//! separates nested keys, e.g. `SENTIMENT_SHIELD_SCAN__DEBOUNCE_MS=500`).
//! Command-line flags are applied on top by the binary.

use sentiment_shield_classifiers::ScoringConfig;
use sentiment_shield_core::{Error, Result};
use sentiment_shield_policy::DEFAULT_BLOCK_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "sentiment-shield.yaml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SENTIMENT_SHIELD";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where settings and counters are persisted
    pub state_path: PathBuf,

    /// Optional YAML lexicon replacing the built-in vocabulary
    pub lexicon_path: Option<PathBuf>,

    /// Engine constants
    pub scoring: ScoringConfig,

    /// Scanner behaviour
    pub scan: ScanConfig,

    /// Logging
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            lexicon_path: None,
            scoring: ScoringConfig::default(),
            scan: ScanConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Scanner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Quiet period before a burst of content events is scanned
    pub debounce_ms: u64,

    /// Blocks with fewer characters are never classified
    pub min_text_chars: usize,

    /// Text is capped at this many characters before classification
    pub max_text_chars: usize,

    /// Counters are persisted every this many analyzed blocks
    pub persist_every: u64,

    /// Dominant score above which a blocked category hides content
    pub block_threshold: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_text_chars: 10,
            max_text_chars: 500,
            persist_every: 10,
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
        }
    }
}

impl ScanConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Reject values the scanner cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_text_chars == 0 {
            return Err(Error::config("scan.max_text_chars must be positive"));
        }
        if self.persist_every == 0 {
            return Err(Error::config("scan.persist_every must be positive"));
        }
        if !self.block_threshold.is_finite() || self.block_threshold < 0.0 {
            return Err(Error::config(format!(
                "scan.block_threshold must be a non-negative number, got {}",
                self.block_threshold
            )));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            json: false,
            level: "info".to_string(),
        }
    }
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("sentiment-shield").join("state.json"))
        .unwrap_or_else(|| PathBuf::from("sentiment-shield-state.json"))
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; without one, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config: Self = config::Config::builder()
            .add_source(config::File::from(file.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::config(format!("Failed to load {}: {e}", file.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the scanner cannot run with
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.scan.validate()
    }
}
