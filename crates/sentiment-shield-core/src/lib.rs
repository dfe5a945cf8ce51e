//! Sentiment Shield Core
//!
//! Core types and utilities shared across Sentiment Shield components.
//!
//! This crate provides:
//! - The closed set of emotion categories and their declaration order
//! - Per-category score maps and the classification result record
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Category, CategoryScores, ClassificationResult, Sentiment};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Category, CategoryScores, ClassificationResult, Sentiment};
}
