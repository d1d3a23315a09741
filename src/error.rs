use thiserror::Error;

/// Unified error type for go-bump operations
#[derive(Error, Debug)]
pub enum GoBumpError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid version format: {0}")]
    Format(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in go-bump
pub type Result<T> = std::result::Result<T, GoBumpError>;

impl GoBumpError {
    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        GoBumpError::NotFound(msg.into())
    }

    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        GoBumpError::Parse(msg.into())
    }

    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        GoBumpError::Format(msg.into())
    }

    /// Create a network error with context
    pub fn network(msg: impl Into<String>) -> Self {
        GoBumpError::Network(msg.into())
    }
}
