//! Error types for the persistence layer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur in the persistence layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored file's content failed to deserialize.
    ///
    /// This aborts the entire load: a silently skipped record would hide
    /// corruption from the caller.
    #[error("failed to deserialize {} with data (\"{content}\"): {reason}", path.display())]
    Deserialize {
        /// Path of the offending file.
        path: PathBuf,
        /// Raw file content that failed to deserialize.
        content: String,
        /// The record type's own description of the failure.
        reason: String,
    },

    /// An update was requested for a record whose file does not exist.
    ///
    /// Updating a never-persisted record is a usage error, not a
    /// recoverable data condition.
    #[error("asked to update {} but it does not exist", path.display())]
    UpdateMissingFile {
        /// Path the update targeted.
        path: PathBuf,
    },
}

impl DbError {
    /// Creates a deserialize error carrying the offending path and content.
    pub fn deserialize(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Deserialize {
            path: path.into(),
            content: content.into(),
            reason: reason.into(),
        }
    }
}

/// Error produced by a record type's [`deserialize`](crate::DiskRecord::deserialize).
///
/// Record types describe what went wrong in their own terms; the store
/// wraps this with file context when a load fails.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DeserializeError {
    message: String,
}

impl DeserializeError {
    /// Creates a deserialize error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
