//! Error types for nsbuild-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from nsbuild-core
    #[error(transparent)]
    Core(#[from] nsbuild_core::Error),

    /// Error from nsbuild-manifest
    #[error(transparent)]
    Manifest(#[from] nsbuild_manifest::Error),

    /// Error from nsbuild-version
    #[error(transparent)]
    Version(#[from] nsbuild_version::Error),

    /// Error from nsbuild-git
    #[error(transparent)]
    Git(#[from] nsbuild_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

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
