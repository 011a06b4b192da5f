use thiserror::Error;

/// Unified error type for utility operations
#[derive(Error, Debug)]
pub enum UtilityError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote service error: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in utility
pub type Result<T> = std::result::Result<T, UtilityError>;

impl UtilityError {
    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        UtilityError::Parse(msg.into())
    }

    /// Create a remote service error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        UtilityError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UtilityError::Config(msg.into())
    }

    /// Create a chart error with context
    pub fn chart(msg: impl Into<String>) -> Self {
        UtilityError::Chart(msg.into())
    }
}

impl From<toml::de::Error> for UtilityError {
    fn from(err: toml::de::Error) -> Self {
        UtilityError::Config(err.to_string())
    }
}
