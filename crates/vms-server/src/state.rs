//! Shared application state for the VMS server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::sync::Arc;

use tokio::sync::watch;
use vms_core::auth::{Authenticator, StaticCredentials};
use vms_core::notify::ChangeNotifier;
use vms_core::store::HeroStore;
use vms_core::upload::{UploadPolicy, UploadStore};
use vms_storage::FileBackend;

use crate::config::ServerConfig;

/// Shared state available to all request handlers.
pub struct AppState {
    /// The hero configuration document.
    pub store: HeroStore,
    /// Image upload writer.
    pub uploads: UploadStore,
    /// Fan-out of committed saves to open change streams.
    pub notifier: ChangeNotifier,
    /// Login gate.
    pub authenticator: Arc<dyn Authenticator>,
    /// Flipped to `true` once the server starts shutting down.
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(store: HeroStore, uploads: UploadStore) -> Self {
        Self {
            store,
            uploads,
            notifier: ChangeNotifier::new(),
            authenticator: Arc::new(StaticCredentials),
            shutdown: watch::Sender::new(false),
        }
    }

    /// Signal long-lived responses (change streams) to finish.
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Resolves once [`begin_shutdown`](Self::begin_shutdown) has been called.
    pub fn shutdown_signal(&self) -> impl Future<Output = ()> + Send + 'static + use<> {
        let mut rx = self.shutdown.subscribe();
        async move {
            let _ = rx.wait_for(|&stopping| stopping).await;
        }
    }

    /// State backed by the on-disk locations named in `config`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let store = HeroStore::new(Arc::new(FileBackend::new(config.hero_path())));
        let uploads = UploadStore::new(
            config.uploads_dir(),
            UploadPolicy {
                max_bytes: config.max_upload_bytes,
            },
        );
        Self::new(store, uploads)
    }
}
