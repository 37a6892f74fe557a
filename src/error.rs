//! Error types for table building, reshaping and hashing.

use thiserror::Error;

/// Result type alias using [`FbtError`].
pub type Result<T> = std::result::Result<T, FbtError>;

/// Failures raised by the phrase core.
///
/// `DuplicateLeafPath`, `MetadataLeafMismatch` and `IncompatibleEnumReuse` always point at a
/// defect in the dimensions handed to the builder and abort the current phrase.
/// `UnsupportedHashModule` is raised while loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FbtError {
    /// Two combinations resolved to the same table position.
    #[error("Overwriting an existing tree leaf is not allowed. keys=`{}`", format_path(.path))]
    DuplicateLeafPath { path: Vec<String> },

    /// A flattened table is a bare leaf while metadata remains, or the other way around.
    #[error(
        "If the JSFBT table depth is 1, then the metadata array should be empty; otherwise, \
         when the depth is greater than 1, the metadata array should not be empty. \
         Metadata length: {metadata_len}"
    )]
    MetadataLeafMismatch { metadata_len: usize },

    /// The configured hash function is not one we know how to run.
    #[error("Unsupported hash module `{name}`. Expected one of: tiger, jenkins, md5")]
    UnsupportedHashModule { name: String },

    /// An enum reused through the same runtime argument does not offer the upstream key.
    #[error("`{key}` not found in enum range of `{source_code}`. Attempting to re-use incompatible enums")]
    IncompatibleEnumReuse { source_code: String, key: String },

    /// A JSON payload that does not have the shape of a phrase table.
    #[error("Invalid JSFBT table: {0}")]
    InvalidTable(String),
}

impl FbtError {
    pub fn invalid_table(msg: impl Into<String>) -> Self {
        FbtError::InvalidTable(msg.into())
    }
}

fn format_path(path: &[String]) -> String {
    serde_json::to_string(path).unwrap_or_default()
}
