//! HTTP client for the VMS server API.

use std::path::Path;

use anyhow::{Context, Result, bail};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

use vms_core::auth::Session;
use vms_core::hero::HeroConfig;

pub struct Client {
    http: reqwest::Client,
    addr: String,
}

impl Client {
    pub fn new(addr: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            addr: addr.trim_end_matches('/').to_owned(),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.addr)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.addr))?;
        handle_response(resp).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.addr))?;
        handle_response(resp).await
    }

    pub async fn health(&self) -> Result<Value> {
        self.get("/health").await
    }

    /// Fetch the current hero document.
    pub async fn hero(&self) -> Result<HeroConfig> {
        let raw = self.get("/api/hero").await?;
        Ok(HeroConfig::normalize(&raw))
    }

    /// Replace the hero document with `config`.
    pub async fn save_hero(&self, config: &HeroConfig) -> Result<()> {
        let body = serde_json::to_value(config).context("failed to encode hero config")?;
        self.post("/api/hero", &body).await?;
        Ok(())
    }

    /// Upload one image; returns its public URL.
    pub async fn upload(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type_for(path))
            .context("invalid content type")?;
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(self.url("/api/hero/upload"))
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("upload of {} failed", path.display()))?;
        let body = handle_response(resp).await?;

        body.get("src")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .context("upload response carried no src")
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let body = self
            .post("/api/login", &json!({ "email": email, "password": password }))
            .await?;
        serde_json::from_value(body).context("unexpected login response")
    }
}

/// Check the status and the `ok` flag; surface the server's `error` text.
async fn handle_response(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    let body = resp.text().await.context("failed to read response body")?;
    let json = serde_json::from_str::<Value>(&body).ok();

    let message = json
        .as_ref()
        .filter(|v| v.get("ok") == Some(&Value::Bool(false)) || !status.is_success())
        .map(|v| {
            v.get("error")
                .and_then(Value::as_str)
                .map_or_else(|| format!("server returned {status}"), str::to_owned)
        });
    if let Some(msg) = message {
        bail!("{msg}");
    }
    if !status.is_success() {
        bail!("server returned {status}: {body}");
    }

    json.context("failed to parse response JSON")
}

/// Declared content type for an image file, by extension. Anything
/// unrecognised is sent as `application/octet-stream` and refused by the
/// server.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
