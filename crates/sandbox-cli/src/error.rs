//! Error types for sandbox-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from sandbox-manifest
    #[error(transparent)]
    Manifest(#[from] sandbox_manifest::Error),

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}
