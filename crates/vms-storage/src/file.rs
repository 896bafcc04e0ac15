//! File-backed document storage.
//!
//! The document lives in a single file (by default `data/hero.json`). Writes
//! go to a sibling temporary file which is then renamed over the target, so a
//! reader never observes a half-written document under normal operation.
//! Every write gets its own temporary file, so concurrent writers never share
//! one. There is no locking: concurrent writers race and the last rename
//! wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;

use crate::{DocumentBackend, StorageError};

/// Per-process sequence for temporary file names.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// A document backend that stores its payload in one file.
///
/// # Examples
///
/// ```no_run
/// # use vms_storage::FileBackend;
/// let backend = FileBackend::new("./data/hero.json");
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the file at `path`.
    ///
    /// Nothing touches the disk until the first read or write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Return the filesystem path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A sibling path no other write in any process is using.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "document".to_owned(), |n| n.to_string_lossy().into_owned());
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
    }

    async fn ensure_parent(&self) -> Result<(), StorageError> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::CreateDir {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn write_err(&self, e: &std::io::Error) -> StorageError {
        StorageError::Write {
            location: self.location(),
            reason: e.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl DocumentBackend for FileBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                location: self.location(),
                reason: e.to_string(),
            }),
        }
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        self.ensure_parent().await?;

        let tmp = self.temp_path();
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .await
            .map_err(|e| self.write_err(&e))?;
        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;
        drop(file);
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.write_err(&e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.write_err(&e));
        }

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "document written");
        Ok(())
    }

    async fn exists(&self) -> Result<bool, StorageError> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StorageError::Read {
                location: self.location(),
                reason: e.to_string(),
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
