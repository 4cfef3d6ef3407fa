//! Error types for sandbox-manifest

use std::path::PathBuf;

/// Result type for sandbox-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, merging or writing a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a fragment or writing the manifest failed
    #[error(transparent)]
    Fs(#[from] sandbox_fs::Error),

    #[error("Failed to parse sandbox config at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to serialize sandbox manifest: {message}")]
    Serialize { message: String },
}

impl Error {
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
