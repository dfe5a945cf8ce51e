//! Sentiment Shield Policy
//!
//! Turns classification results into hide/show decisions.
//!
//! Provides:
//! - User settings (enabled flag, blocked categories, allow-list)
//! - Runtime settings updates with tolerant merging
//! - The policy filter with allow-list override and score threshold

pub mod filter;
pub mod settings;

pub use filter::{AllowReason, PolicyFilter, Verdict, DEFAULT_BLOCK_THRESHOLD};
pub use settings::{normalize_author, AllowList, BlockedCategories, Settings, SettingsUpdate};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::filter::{AllowReason, PolicyFilter, Verdict};
    pub use crate::settings::{AllowList, BlockedCategories, Settings, SettingsUpdate};
}
