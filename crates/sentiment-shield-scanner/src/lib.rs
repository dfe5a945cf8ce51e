//! Sentiment Shield Scanner
//!
//! Host side of the shield: feeds page content through the classifier and
//! policy, remembers what was processed and hidden, and persists settings
//! and counters between runs.
//!
//! - [`scanner`]: per-block processing, dedup, reveal, forget and settings changes
//! - [`watcher`]: debounced event loop over host events
//! - [`store`]: JSON state file with atomic replacement
//! - [`config`]: layered configuration
//! - [`commands`]: implementations behind the `sentiment-shield` binary

pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod notice;
pub mod scanner;
pub mod store;
pub mod watcher;

pub use config::{AppConfig, LogConfig, ScanConfig};
pub use content::ContentBlock;
pub use notice::BlockNotice;
pub use scanner::{ScanOutcome, ScanReport, Scanner};
pub use store::{PersistedState, StateStore};
pub use watcher::{HostEvent, WatcherHandle};
