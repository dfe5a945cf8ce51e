//! Content blocks handed to the scanner by the host

use sentiment_shield_policy::normalize_author;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One post or comment as extracted from the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Stable identifier assigned by the host
    pub id: String,

    /// Author handle, possibly empty
    #[serde(default)]
    pub author: String,

    /// Visible text
    pub text: String,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            text: text.into(),
        }
    }

    /// Normalized copy: author trimmed, `@` dropped and lowercased; text
    /// trimmed and capped at `max_chars` characters.
    pub fn normalized(&self, max_chars: usize) -> Self {
        let text = self.text.trim();
        let text = match text.char_indices().nth(max_chars) {
            Some((end, _)) => &text[..end],
            None => text,
        };

        Self {
            id: self.id.clone(),
            author: normalize_author(&self.author),
            text: text.to_string(),
        }
    }

    /// Hex SHA-256 of the text, used to detect edits to a known id
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
