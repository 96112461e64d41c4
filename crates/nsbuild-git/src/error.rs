//! Error types for nsbuild-git

use std::path::PathBuf;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("No git repository found at or above {path}")]
    NotARepository { path: PathBuf },

    #[error("Tag '{name}' already exists")]
    TagExists { name: String },
}
