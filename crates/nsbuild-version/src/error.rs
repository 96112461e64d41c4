//! Error types for nsbuild-version

/// Result type for version operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing versions or constraints
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A version string does not match the supported PEP 440 subset
    #[error("invalid version '{input}': {reason}")]
    VersionParse { input: String, reason: String },

    /// A constraint string could not be parsed
    #[error("invalid version constraint '{constraint}': {reason}")]
    ConstraintParse { constraint: String, reason: String },
}
