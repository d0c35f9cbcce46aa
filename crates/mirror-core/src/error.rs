//! Error types for mirror-core

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalogue answered with a bad status, bad JSON or not at all
    #[error("Upstream catalogue error: {message}")]
    Upstream { message: String },

    /// A collection configured by name does not exist upstream
    #[error("Collection not found: {name}")]
    CollectionNotFound { name: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The cycle was cancelled before this collection finished resolving
    #[error("Cycle cancelled")]
    Cancelled,

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}

impl Error {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
