//! Error types for nsbuild-core

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during namespace resolution
///
/// All of these indicate a misconfigured manifest or build invocation that
/// needs operator correction; none are transient, and the host pipeline is
/// expected to abort the build on any of them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A namespace declaration location has the wrong structural shape
    #[error("{path} should be a table")]
    ConfigShape { path: String },

    /// The requested build target is not among the declared packages
    #[error("no namespace package named '{name}' was declared")]
    UnknownNamespaceTarget { name: String },

    /// A package definition is not a table of settings
    #[error("namespace package '{name}' should be a table of settings")]
    MalformedPackageDefinition { name: String },

    /// A package's project entry is not a table of metadata
    #[error("project entry of namespace package '{name}' should be a table of metadata")]
    MalformedPackageMetadata { name: String },

    /// Deep merge hit the same key with incompatible kinds on each side
    #[error("key `{key}` differs in kind between root metadata and namespace metadata")]
    MergeTypeConflict { key: String },

    /// Manifest error, including schema re-validation failures
    #[error(transparent)]
    Manifest(#[from] nsbuild_manifest::Error),
}
