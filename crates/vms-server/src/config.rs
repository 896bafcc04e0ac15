//! Server configuration for the VMS site.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `VMS_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use vms_core::upload::MAX_UPLOAD_BYTES;

const DEFAULT_PORT: u16 = 3000;

/// File name of the hero document inside the data directory.
pub const HERO_FILE: &str = "hero.json";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Directory holding `hero.json`.
    pub data_dir: PathBuf,
    /// Public directory; uploads land in `<public_dir>/uploads`.
    pub public_dir: PathBuf,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `VMS_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `VMS_DATA_DIR`: directory for `hero.json` (default: `./data`)
    /// - `VMS_PUBLIC_DIR`: public directory for uploads (default: `./public`)
    /// - `VMS_LOG_LEVEL`: log filter (default: `info`)
    /// - `VMS_MAX_UPLOAD_BYTES`: upload size limit (default: 5 MiB)
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: VMS_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Ok(addr) = std::env::var("VMS_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
        };

        let data_dir = std::env::var("VMS_DATA_DIR").unwrap_or_else(|_| "./data".to_owned());
        let public_dir =
            std::env::var("VMS_PUBLIC_DIR").unwrap_or_else(|_| "./public".to_owned());

        let log_level = std::env::var("VMS_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let max_upload_bytes = std::env::var("VMS_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u64| n > 0)
            .unwrap_or(MAX_UPLOAD_BYTES);

        Self {
            bind_addr,
            data_dir: PathBuf::from(data_dir),
            public_dir: PathBuf::from(public_dir),
            log_level,
            max_upload_bytes,
        }
    }

    /// Path of the hero configuration document.
    #[must_use]
    pub fn hero_path(&self) -> PathBuf {
        self.data_dir.join(HERO_FILE)
    }

    /// Directory uploads are written to and served from.
    #[must_use]
    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join("uploads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths() {
        let config = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            data_dir: PathBuf::from("/srv/vms/data"),
            public_dir: PathBuf::from("/srv/vms/public"),
            log_level: "info".to_owned(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        };
        assert_eq!(config.hero_path(), PathBuf::from("/srv/vms/data/hero.json"));
        assert_eq!(config.uploads_dir(), PathBuf::from("/srv/vms/public/uploads"));
    }
}
