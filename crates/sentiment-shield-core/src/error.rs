//! Error types for Sentiment Shield

/// Result type alias using Sentiment Shield's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Sentiment Shield operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lexicon construction or validation errors
    #[error("lexicon error: {0}")]
    Lexicon(String),

    /// Policy or settings errors
    #[error("policy error: {0}")]
    Policy(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistent state errors
    #[error("store error: {0}")]
    Store(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new lexicon error
    pub fn lexicon(msg: impl Into<String>) -> Self {
        Self::Lexicon(msg.into())
    }

    /// Create a new policy error
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::Policy(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
