//! Image upload validation and storage.
//!
//! An upload is accepted only if its declared content type starts with
//! `image/` and its payload is at most [`MAX_UPLOAD_BYTES`]. Accepted files
//! are written into the public upload directory as
//! `<millis>-<sanitized-name>` and referenced by the URL
//! `/uploads/<millis>-<sanitized-name>`.
//!
//! Nothing is ever deleted: removing a slide from the configuration leaves
//! its file in place.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::UploadError;

/// Default upload size limit: 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// URL prefix under which uploaded files are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Type and size rules for uploaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest accepted payload, inclusive.
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Check the declared content type only.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidType`] unless `content_type` starts with
    /// `image/`.
    pub fn check_type(&self, content_type: &str) -> Result<(), UploadError> {
        if content_type.starts_with("image/") {
            Ok(())
        } else {
            Err(UploadError::InvalidType {
                content_type: content_type.to_owned(),
            })
        }
    }

    /// Check the payload size only.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TooLarge`] if `size` exceeds the limit.
    pub fn check_size(&self, size: u64) -> Result<(), UploadError> {
        if size > self.max_bytes {
            Err(UploadError::TooLarge {
                size,
                max_bytes: self.max_bytes,
            })
        } else {
            Ok(())
        }
    }

    /// Check type, then size. A non-image is rejected whatever its size.
    ///
    /// # Errors
    ///
    /// See [`check_type`](Self::check_type) and [`check_size`](Self::check_size).
    pub fn validate(&self, content_type: &str, size: u64) -> Result<(), UploadError> {
        self.check_type(content_type)?;
        self.check_size(size)
    }
}

/// Make an uploaded file name safe to use as a path component.
///
/// Every run of characters outside `[A-Za-z0-9_.-]` becomes one `_`. Names
/// that would be empty or made only of dots become `upload`.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    if out.chars().all(|c| c == '.') {
        "upload".to_owned()
    } else {
        out
    }
}

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// File name inside the upload directory.
    pub filename: String,
    /// Public URL path, e.g. `/uploads/1718000000000-deck.jpg`.
    pub src: String,
    /// Bytes written.
    pub size: u64,
}

/// Writes accepted uploads into the public upload directory.
#[derive(Debug)]
pub struct UploadStore {
    dir: PathBuf,
    policy: UploadPolicy,
    last_stamp: AtomicI64,
}

impl UploadStore {
    /// Create a store writing into `dir` (created on first save).
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, policy: UploadPolicy) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            policy,
            last_stamp: AtomicI64::new(0),
        }
    }

    /// The directory files are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The rules this store enforces.
    #[must_use]
    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    /// Validate and persist one image.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidType`] or [`UploadError::TooLarge`] when
    /// the policy rejects the file, and [`UploadError::Io`] when the
    /// directory or file cannot be written.
    pub async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        self.policy.validate(content_type, bytes.len() as u64)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| UploadError::Io {
                path: self.dir.display().to_string(),
                reason: e.to_string(),
            })?;

        let filename = format!("{}-{}", self.next_stamp(), sanitize_filename(original_name));
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| UploadError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(file = %filename, size = bytes.len(), "upload stored");

        Ok(StoredUpload {
            src: format!("{UPLOAD_URL_PREFIX}/{filename}"),
            filename,
            size: bytes.len() as u64,
        })
    }

    /// Milliseconds since the epoch, strictly increasing within this store.
    fn next_stamp(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = self.last_stamp.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev.saturating_add(1));
            match self.last_stamp.compare_exchange_weak(
                prev,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}
