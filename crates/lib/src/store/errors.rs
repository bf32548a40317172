//! Storage error types for HealthConnect.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing a store.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization failed.
    #[error("Serialization failed for {what}")]
    SerializationFailed {
        /// The record or file that could not be encoded
        what: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// The backing file could not be parsed.
    #[error("Deserialization failed for {}", path.display())]
    DeserializationFailed {
        /// The file that failed to parse
        path: PathBuf,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error on {}", path.display())]
    FileIo {
        /// The file being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Check if this error is related to file I/O.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::FileIo { .. })
    }

    /// Check if this error is related to encoding or decoding values.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
