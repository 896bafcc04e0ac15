//! Durable home of the [`HeroConfig`] singleton.
//!
//! [`HeroStore`] is the only reader and writer of the backing document. Reads
//! never fail: a missing document is initialized with defaults, a malformed
//! one is normalized field by field, and an unparsable one yields the whole
//! default document. Writes are read-modify-write without locking; two
//! concurrent saves race and the later one wins.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use vms_storage::DocumentBackend;

use crate::error::StoreError;
use crate::hero::HeroConfig;

/// Reads and writes the hero configuration through a document backend.
#[derive(Clone)]
pub struct HeroStore {
    backend: Arc<dyn DocumentBackend>,
}

impl std::fmt::Debug for HeroStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroStore")
            .field("location", &self.backend.location())
            .finish()
    }
}

impl HeroStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Load the current document, best effort.
    ///
    /// If the backing document does not exist it is created with defaults.
    /// Storage and parse failures are logged and answered with defaults.
    pub async fn load(&self) -> HeroConfig {
        match self.backend.read().await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(raw) => HeroConfig::normalize(&raw),
                Err(e) => {
                    warn!(
                        location = %self.backend.location(),
                        error = %e,
                        "hero config is not valid JSON, serving defaults"
                    );
                    HeroConfig::default()
                }
            },
            Ok(None) => {
                let defaults = HeroConfig::default();
                match self.write(&defaults).await {
                    Ok(()) => info!(
                        location = %self.backend.location(),
                        "initialized hero config with defaults"
                    ),
                    Err(e) => warn!(error = %e, "failed to initialize hero config"),
                }
                defaults
            }
            Err(e) => {
                warn!(error = %e, "failed to read hero config, serving defaults");
                HeroConfig::default()
            }
        }
    }

    /// Merge `patch` onto the current document and persist the result.
    ///
    /// Returns the document as written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    /// Nothing is written in that case.
    pub async fn save(&self, patch: &Value) -> Result<HeroConfig, StoreError> {
        let next = self.load().await.merge(patch);
        self.write(&next).await?;
        info!(
            slides = next.slides.len(),
            products = next.products.len(),
            services = next.technical_services.len(),
            "hero config saved"
        );
        Ok(next)
    }

    async fn write(&self, cfg: &HeroConfig) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(cfg).map_err(|e| StoreError::Serialize {
            reason: e.to_string(),
        })?;
        self.backend.write(&bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::hero::Slide;
    use serde_json::json;
    use vms_storage::{FileBackend, MemoryBackend, StorageError};

    fn memory_store() -> (HeroStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        (HeroStore::new(Arc::new(backend.clone())), backend)
    }

    #[tokio::test]
    async fn load_on_empty_backend_writes_and_returns_defaults() {
        let (store, backend) = memory_store();

        assert_eq!(store.load().await, HeroConfig::default());

        let written = backend.read().await.unwrap().unwrap();
        let raw: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(HeroConfig::normalize(&raw), HeroConfig::default());
    }

    #[tokio::test]
    async fn load_unparsable_document_returns_defaults() {
        let backend = MemoryBackend::with_content(b"{ not json".to_vec());
        let store = HeroStore::new(Arc::new(backend));
        assert_eq!(store.load().await, HeroConfig::default());
    }

    #[tokio::test]
    async fn load_keeps_valid_fields_of_partially_malformed_document() {
        let backend = MemoryBackend::with_content(
            serde_json::to_vec(&json!({ "title": "Kept", "slides": 12 })).unwrap(),
        );
        let store = HeroStore::new(Arc::new(backend));

        let cfg = store.load().await;
        assert_eq!(cfg.title, "Kept");
        assert!(cfg.slides.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_valid_fields() {
        let (store, _) = memory_store();
        store
            .save(&json!({ "title": "Anchors", "slides": [{ "src": "/uploads/1-a.jpg" }] }))
            .await
            .unwrap();

        let saved = store
            .save(&json!({ "subtitle": "Chandlery", "title": 5 }))
            .await
            .unwrap();

        assert_eq!(saved.title, "Anchors");
        assert_eq!(saved.subtitle, "Chandlery");
        assert_eq!(saved.slides, vec![Slide::new("/uploads/1-a.jpg")]);
        assert_eq!(store.load().await, saved);
    }

    #[tokio::test]
    async fn save_writes_pretty_json() {
        let (store, backend) = memory_store();
        store.save(&json!({})).await.unwrap();
        let text = String::from_utf8(backend.read().await.unwrap().unwrap()).unwrap();
        assert!(text.contains("\n  \"title\""));
    }

    #[tokio::test]
    async fn file_backed_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("hero.json");

        let first = HeroStore::new(Arc::new(FileBackend::new(&path)));
        first.save(&json!({ "title": "Persisted" })).await.unwrap();

        let second = HeroStore::new(Arc::new(FileBackend::new(&path)));
        assert_eq!(second.load().await.title, "Persisted");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_leave_one_complete_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.json");
        let store = HeroStore::new(Arc::new(FileBackend::new(&path)));
        store
            .save(&json!({ "subtitle": "Chandlery", "slides": [{ "src": "/uploads/1-a.jpg" }] }))
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                let title = format!("Title {i} {}", "~".repeat(i * 300));
                tokio::spawn(async move { store.save(&json!({ "title": title })).await })
            })
            .collect();
        let mut saved = Vec::new();
        for handle in handles {
            saved.push(handle.await.unwrap().unwrap());
        }

        let current = store.load().await;
        assert!(saved.contains(&current), "stored document matches no save");
        assert_eq!(current.subtitle, "Chandlery");
        assert_eq!(current.slides, vec![Slide::new("/uploads/1-a.jpg")]);
    }

    struct FailingBackend;

    #[async_trait::async_trait]
    impl DocumentBackend for FailingBackend {
        async fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::Read {
                location: "broken".to_owned(),
                reason: "disk on fire".to_owned(),
            })
        }

        async fn write(&self, _bytes: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Write {
                location: "broken".to_owned(),
                reason: "disk on fire".to_owned(),
            })
        }

        fn location(&self) -> String {
            "broken".to_owned()
        }
    }

    #[tokio::test]
    async fn load_never_fails_even_when_backend_does() {
        let store = HeroStore::new(Arc::new(FailingBackend));
        assert_eq!(store.load().await, HeroConfig::default());
    }

    #[tokio::test]
    async fn save_surfaces_backend_write_failure() {
        let store = HeroStore::new(Arc::new(FailingBackend));
        let err = store.save(&json!({ "title": "x" })).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(err.to_string().contains("disk on fire"));
    }
}
