//! Error types for cache operations

use thiserror::Error;

/// Error type shared by validation, serialization and backend I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CachifyError {
    /// A key, prefix or duration was rejected before touching the store
    #[error("{0}")]
    InvalidArgument(String),

    /// Unknown mode or a missing collaborator at construction time
    #[error("{0}")]
    Configuration(String),

    /// Value could not be turned into its stored form
    #[error("Failed to stringify value for key {key}: {message}")]
    Serialization { key: String, message: String },

    /// Stored form could not be turned back into a value
    #[error("Failed to parse JSON for key {key}: {message}")]
    Deserialization { key: String, message: String },

    /// Remote store operation failed
    #[error("backend error: {0}")]
    Backend(String),
}

impl CachifyError {
    pub(crate) fn serialization(key: &str, err: impl std::fmt::Display) -> Self {
        CachifyError::Serialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn deserialization(key: &str, err: impl std::fmt::Display) -> Self {
        CachifyError::Deserialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    /// True for errors raised before any store interaction
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CachifyError::InvalidArgument(_))
    }
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CachifyError>;
