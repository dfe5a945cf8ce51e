//! Persistent settings and counters
//!
//! One flat JSON document with the keys `enabled`, `blockedEmotions`,
//! `whitelist`, `analyzed` and `blocked`.

use parking_lot::Mutex;
use sentiment_shield_core::{Error, Result};
use sentiment_shield_policy::Settings;
use sentiment_shield_telemetry::StatsSnapshot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything that survives a restart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(flatten)]
    pub settings: Settings,

    #[serde(flatten)]
    pub stats: StatsSnapshot,
}

/// JSON file store with atomic replacement
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state; a missing file yields defaults
    pub fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No state file, using defaults");
            return Ok(PersistedState::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(PersistedState::default());
        }

        let state: PersistedState = serde_json::from_str(&content).map_err(|e| {
            Error::store(format!("Failed to parse {}: {e}", self.path.display()))
        })?;

        info!(
            path = %self.path.display(),
            analyzed = state.stats.analyzed,
            blocked = state.stats.blocked,
            "State loaded"
        );
        Ok(state)
    }

    /// Write the state to a temporary sibling, then rename it into place
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        let json = serde_json::to_vec_pretty(state)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            Error::store(format!(
                "Failed to replace {} with {}: {e}",
                self.path.display(),
                tmp.display()
            ))
        })?;

        debug!(path = %self.path.display(), "State saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
