//! Error types for mirror-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] mirror_core::Error),

    #[error(transparent)]
    Emby(#[from] mirror_emby::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mirror cycle task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
