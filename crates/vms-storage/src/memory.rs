//! In-memory document backend for testing.
//!
//! Holds the document behind a `RwLock`. Nothing is persisted; the data is
//! lost when the process exits.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{DocumentBackend, StorageError};

/// An in-memory document backend.
///
/// Clones share the same document, which lets a test keep a handle for
/// inspecting what the store wrote.
///
/// # Examples
///
/// ```
/// # use vms_storage::{MemoryBackend, DocumentBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.write(b"{}").await.unwrap();
/// assert_eq!(backend.read().await.unwrap(), Some(b"{}".to_vec()));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    data: Arc<RwLock<Option<Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `bytes`.
    #[must_use]
    pub fn with_content(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(bytes.into()))),
        }
    }
}

#[async_trait::async_trait]
impl DocumentBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.read().await.clone())
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        *self.data.write().await = Some(bytes.to_vec());
        Ok(())
    }

    async fn exists(&self) -> Result<bool, StorageError> {
        Ok(self.data.read().await.is_some())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
