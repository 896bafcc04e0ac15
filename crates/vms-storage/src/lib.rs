//! Document storage backends for the VMS site.
//!
//! This crate defines the [`DocumentBackend`] trait: a single-document store
//! that holds one opaque byte payload. It knows nothing about the hero
//! configuration schema; `vms-core` serializes and normalizes above this
//! layer.
//!
//! Two implementations are provided:
//!
//! - [`FileBackend`]: production default, one file on disk, replaced atomically
//! - [`MemoryBackend`]: in-memory, for testing only

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileBackend;
pub use memory::MemoryBackend;

/// A pluggable single-document storage backend.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
/// There is no locking across a read-modify-write cycle: two concurrent
/// writers race and the later `write` wins.
#[async_trait::async_trait]
pub trait DocumentBackend: Send + Sync + 'static {
    /// Read the whole document.
    ///
    /// Returns `Ok(None)` if the document has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn write(&self, bytes: &[u8]) -> Result<(), StorageError>;

    /// Check whether the document exists.
    ///
    /// The default implementation calls [`read`](DocumentBackend::read) and
    /// checks for `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn exists(&self) -> Result<bool, StorageError> {
        Ok(self.read().await?.is_some())
    }

    /// Human-readable location for logs (a path, or `memory`).
    fn location(&self) -> String;
}
