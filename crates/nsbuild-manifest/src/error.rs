//! Error types for nsbuild-manifest

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading or validating a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manifest location that must be a table holds another kind of value
    #[error("{path} should be a table")]
    NotATable { path: String },

    /// A required metadata field is absent
    #[error("missing required field {field}")]
    MissingField { field: String },

    /// A metadata field holds the wrong kind of value
    #[error("{field} should be {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
    },

    /// The project version does not parse
    #[error("invalid project version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: nsbuild_version::Error,
    },

    /// The requires-python constraint does not parse
    #[error("invalid requires-python constraint: {source}")]
    InvalidConstraint { source: nsbuild_version::Error },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
