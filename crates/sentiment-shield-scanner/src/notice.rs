//! Placeholder shown in place of hidden content

use sentiment_shield_core::Category;
use serde::Serialize;

/// What the host renders over a blocked block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockNotice {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub confidence_percent: u8,
}

impl BlockNotice {
    pub fn new(category: Category, confidence: f64) -> Self {
        Self {
            category,
            label: label(category),
            color: color(category),
            confidence_percent: (confidence.clamp(0.0, 1.0) * 100.0).round() as u8,
        }
    }
}

/// Human-readable label for a category
pub fn label(category: Category) -> &'static str {
    match category {
        Category::Anger => "Anger Detected",
        Category::Sadness => "Sadness Detected",
        Category::Toxic => "Toxic Content",
        Category::Fear => "Fear-Inducing",
        Category::Spam => "Possible Spam",
    }
}

/// Accent colour for a category
pub fn color(category: Category) -> &'static str {
    match category {
        Category::Anger => "#ff4d4d",
        Category::Sadness => "#6b9fd4",
        Category::Toxic => "#c44dff",
        Category::Fear => "#ff9933",
        Category::Spam => "#ffcc00",
    }
}
