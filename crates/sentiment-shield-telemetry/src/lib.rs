//! Sentiment Shield Telemetry
//!
//! Running counters for analyzed and blocked content.
//!
//! Provides:
//! - Lock-free `analyzed` / `blocked` counters with saturating reveal
//! - Serializable snapshots for persistence and the block-rate readout
//! - Emission through the `metrics` facade for whichever recorder the host installs

pub mod stats;

pub use stats::{StatsCollector, StatsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::stats::{StatsCollector, StatsSnapshot};
}
