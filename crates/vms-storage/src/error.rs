//! Storage error types.
//!
//! Every variant carries the location and the underlying reason so a failed
//! save can be diagnosed from the log line alone.

/// Errors that can occur during document storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read the document.
    #[error("failed to read '{location}': {reason}")]
    Read { location: String, reason: String },

    /// Failed to write the document.
    #[error("failed to write '{location}': {reason}")]
    Write { location: String, reason: String },

    /// Failed to create the directory that holds the document.
    #[error("failed to create directory '{path}': {reason}")]
    CreateDir { path: String, reason: String },
}
