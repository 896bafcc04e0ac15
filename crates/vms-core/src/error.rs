//! Error types for `vms-core`.
//!
//! Each error variant carries enough context to explain the failure to the
//! operator who triggered it. Messages are shown verbatim in the admin
//! surfaces, so they are written as plain sentences.

use vms_storage::StorageError;

/// Errors from the hero configuration store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document could not be serialized to JSON.
    #[error("failed to serialize hero config: {reason}")]
    Serialize { reason: String },

    /// The underlying document backend failed.
    #[error("hero config storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from image uploads.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The request did not carry a `file` field.
    #[error("no file was provided")]
    MissingFile,

    /// The declared content type is not an image.
    #[error("only image files are allowed (got '{content_type}')")]
    InvalidType { content_type: String },

    /// The payload exceeds the size limit.
    #[error("file size must be at most {max_bytes} bytes (got {size})")]
    TooLarge { size: u64, max_bytes: u64 },

    /// Reading the payload or writing it to disk failed.
    #[error("upload I/O failed for '{path}': {reason}")]
    Io { path: String, reason: String },
}

impl UploadError {
    /// Whether this error is the client's fault (wrong type, too large,
    /// missing file) rather than a server-side I/O failure.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Errors from the login gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email or password was blank.
    #[error("please fill in all fields")]
    MissingFields,

    /// No account matches the email, or the password is wrong.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Errors from lead form validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    /// One or more fields failed validation.
    #[error("please correct the highlighted fields: {}", fields.join(", "))]
    Invalid { fields: Vec<&'static str> },
}

/// Errors from the admin editor session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// An upload or save is in flight.
    #[error("editor is busy ({state})")]
    Busy { state: &'static str },

    /// The session is not in a state that accepts this operation.
    #[error("cannot {operation} while editor is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}
