use thiserror::Error;

/// Unified error type for affirm operations
#[derive(Error, Debug)]
pub enum AffirmError {
    #[error("Missing required context: {0}")]
    MissingContext(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Version resolution failed: {0}")]
    Resolution(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in affirm
pub type Result<T> = std::result::Result<T, AffirmError>;

impl AffirmError {
    /// Create a missing-context error naming the absent input
    pub fn missing_context(what: impl Into<String>) -> Self {
        AffirmError::MissingContext(what.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AffirmError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AffirmError::Version(msg.into())
    }

    /// Create a resolution error with context
    pub fn resolution(msg: impl Into<String>) -> Self {
        AffirmError::Resolution(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        AffirmError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        AffirmError::Remote(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        AffirmError::Publish(msg.into())
    }
}
