//! Error types for Sectioned.
//!
//! Normal-flow list operations never return errors. [`ListError`] describes
//! programming errors; the controller reports them through
//! [`Diagnostics`](crate::Diagnostics) and degrades to a no-op or a zero size.
//! [`ConfigError`] is returned by configuration loading.

use std::path::PathBuf;

use crate::model::IndexPath;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Programming errors detected by the list controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// A cell model has an empty identifier.
    #[error("Cell model at {index_path} has an empty identifier")]
    EmptyIdentifier { index_path: IndexPath },

    /// Two cell models share an identifier.
    #[error("Duplicate cell identifier '{identifier}' at {first} and {second}")]
    DuplicateIdentifier {
        identifier: String,
        first: IndexPath,
        second: IndexPath,
    },

    /// Two sections share an identifier.
    #[error("Duplicate section identifier '{identifier}'")]
    DuplicateSectionIdentifier { identifier: String },

    /// A size query named a section that is not bound to the list.
    #[error("Section '{identifier}' is not bound to the list")]
    SectionNotFound { identifier: String },

    /// A scroll request named a cell model that is not bound to the list.
    #[error("Cell model '{identifier}' is not bound to the list")]
    CellModelNotFound { identifier: String },

    /// An index path does not address a cell in the current state.
    #[error("No cell model at {index_path}")]
    IndexPathOutOfBounds { index_path: IndexPath },

    /// The host view has not realized an index path yet.
    #[error("Index path {index_path} is not available in the host view")]
    IndexPathNotRealized { index_path: IndexPath },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format.
    #[error("Unsupported configuration format for '{path}'")]
    UnsupportedFormat { path: PathBuf },

    /// A value parsed but is out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
