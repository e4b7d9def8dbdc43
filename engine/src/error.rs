use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    StorageError(String),

    // Hard-fail: the countdown list is full.
    #[error("Maximum {limit} countdowns allowed")]
    CapacityExceeded { limit: usize },

    #[error("{0}")]
    InvalidInput(String),

    // Hard-fail: the value could not be serialized back to text.
    #[error("Failed to {action} JSON: {message}")]
    FormattingError { action: &'static str, message: String },

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    // Catch-all for anyhow errors when direct conversion is suitable
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// True for the errors the shell reports as a plain user-facing message
    /// rather than an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EngineError::CapacityExceeded { .. }
                | EngineError::InvalidInput(_)
                | EngineError::FormattingError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
