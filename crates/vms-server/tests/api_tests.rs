//! HTTP API tests driving the full router in-process.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use futures::StreamExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use vms_core::hero::HeroConfig;
use vms_core::store::HeroStore;
use vms_core::upload::{UploadPolicy, UploadStore};
use vms_server::build_router;
use vms_server::state::AppState;
use vms_storage::FileBackend;

const MIB: usize = 1024 * 1024;

struct TestApp {
    router: Router,
    dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = HeroStore::new(Arc::new(FileBackend::new(dir.path().join("data/hero.json"))));
        let uploads = UploadStore::new(dir.path().join("public/uploads"), UploadPolicy::default());
        std::fs::create_dir_all(dir.path().join("public/uploads")).unwrap();
        let router = build_router(Arc::new(AppState::new(store, uploads)));
        Self { router, dir }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }

    async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn get_hero(&self) -> Value {
        let (status, body) = self.json(get("/api/hero")).await;
        assert_eq!(status, StatusCode::OK);
        body
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "vms-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post("/api/hero/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ── Config API ───────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_serves_defaults_and_creates_document() {
    let app = TestApp::new();
    let (status, headers, body) = app.send(get("/api/hero")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, serde_json::to_value(HeroConfig::default()).unwrap());
    assert!(app.dir.path().join("data/hero.json").exists());
}

#[tokio::test]
async fn post_then_get_keeps_valid_fields_and_prior_values() {
    let app = TestApp::new();
    let patch = json!({
        "title": "  Chandlery at every port  ",
        "subtitle": 42,
        "slides": [
            { "src": "/uploads/1-deck.jpg", "alt": "Deck" },
            { "alt": "no src" },
            "not an object"
        ],
        "products": "nope",
        "technicalServices": [
            { "title": "Calibration", "images": ["/uploads/2-a.png", 7] }
        ],
        "button1": { "text": "Call us", "href": 5 },
        "unknown": true
    });

    let (status, body) = app.json(post_json("/api/hero", &patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let hero = app.get_hero().await;
    let defaults = HeroConfig::default();
    assert_eq!(hero["title"], "  Chandlery at every port  ");
    assert_eq!(hero["subtitle"], defaults.subtitle.as_str());
    assert_eq!(hero["slides"], json!([{ "src": "/uploads/1-deck.jpg", "alt": "Deck" }]));
    assert_eq!(hero["products"], json!([]));
    assert_eq!(
        hero["technicalServices"],
        json!([{ "title": "Calibration", "desc": "", "alt": "", "images": ["/uploads/2-a.png"] }])
    );
    assert_eq!(hero["button1"], json!({ "text": "Call us", "href": "#cta" }));
    assert_eq!(hero["button2"], json!({ "text": "View Catalogue", "href": "#catalogues" }));
    assert!(hero.get("unknown").is_none());
}

#[tokio::test]
async fn malformed_post_is_rejected_without_writing() {
    let app = TestApp::new();
    let request = Request::post("/api/hero")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = app.json(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());

    assert_eq!(
        app.get_hero().await,
        serde_json::to_value(HeroConfig::default()).unwrap()
    );
}

#[tokio::test]
async fn legacy_hero_image_document_reads_as_one_slide() {
    let app = TestApp::new();
    let data = app.dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("hero.json"),
        r#"{ "title": "Old", "heroImage": "/uploads/legacy.jpg" }"#,
    )
    .unwrap();

    let hero = app.get_hero().await;
    assert_eq!(hero["title"], "Old");
    assert_eq!(hero["slides"], json!([{ "src": "/uploads/legacy.jpg" }]));
}

// ── Uploads ──────────────────────────────────────────────────────────

#[tokio::test]
async fn non_image_upload_rejected_regardless_of_size() {
    let app = TestApp::new();
    for size in [10, 6 * MIB] {
        let (status, body) = app
            .json(upload("file", "notes.txt", "text/plain", &vec![b'a'; size]))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().unwrap().contains("image"));
    }
}

#[tokio::test]
async fn oversized_image_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .json(upload("file", "big.png", "image/png", &vec![0; 6 * MIB]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("size"));

    let stored = std::fs::read_dir(app.dir.path().join("public/uploads"))
        .unwrap()
        .count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn image_upload_is_stored_and_served() {
    let app = TestApp::new();
    let data = vec![7u8; 4 * MIB];
    let (status, body) = app
        .json(upload("file", "hull photo.png", "image/png", &data))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let src = body["src"].as_str().unwrap();
    assert!(src.starts_with("/uploads/"));
    assert!(src.ends_with("-hull_photo.png"));

    let filename = src.trim_start_matches("/uploads/");
    let on_disk = std::fs::read(app.dir.path().join("public/uploads").join(filename)).unwrap();
    assert_eq!(on_disk.len(), data.len());

    let (status, _, served) = app.send(get(src)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served.len(), data.len());
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .json(upload("attachment", "a.png", "image/png", b"png"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no file was provided");
}

// ── Login and leads ──────────────────────────────────────────────────

#[tokio::test]
async fn admin_login_redirects_to_editor() {
    let app = TestApp::new();
    let (status, body) = app
        .json(post_json(
            "/api/login",
            &json!({ "email": "Admin@VMS.com", "password": "admin123" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "email": "admin@vms.com", "role": "admin", "redirect": "/admin/hero" })
    );
}

#[tokio::test]
async fn login_failures() {
    let app = TestApp::new();
    let (status, body) = app
        .json(post_json(
            "/api/login",
            &json!({ "email": "user@vms.com", "password": "wrong" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["ok"], false);

    let (status, _) = app
        .json(post_json("/api/login", &json!({ "email": "user@vms.com" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn server_accepts_no_lead_data() {
    let app = TestApp::new();
    let (status, _, _) = app
        .send(post_json(
            "/api/leads",
            &json!({ "name": "Ada", "email": "ada@shipyard.example", "phone": "+91 22 5555 0101" }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, body) = app.send(get("/")).await;
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"data-min-phone-digits="8""#));
    assert!(!html.contains("/api/leads"));
}

// ── Change stream, pages, health ─────────────────────────────────────

#[tokio::test]
async fn save_is_announced_on_change_stream() {
    let app = TestApp::new();
    let response = app.router.clone().oneshot(get("/api/hero/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
    let mut events = response.into_body().into_data_stream();

    let (status, _) = app
        .json(post_json("/api/hero", &json!({ "title": "Updated" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let chunk = tokio::time::timeout(Duration::from_secs(5), events.next())
        .await
        .expect("event within timeout")
        .expect("stream open")
        .unwrap();
    let text = String::from_utf8_lossy(&chunk);
    assert!(text.contains("event: hero-updated"), "got {text:?}");
}

#[tokio::test]
async fn landing_page_renders_current_document() {
    let app = TestApp::new();
    app.json(post_json(
        "/api/hero",
        &json!({
            "title": "Supplies & <Service>",
            "slides": [{ "src": "/uploads/a.jpg" }, { "src": "/uploads/b.jpg" }]
        }),
    ))
    .await;

    let (status, _, body) = app.send(get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Supplies &amp; &lt;Service&gt;"));
    assert!(html.contains(r#"data-interval="6000""#));
    assert!(html.contains(r#"id="lead-form""#));
}

#[tokio::test]
async fn static_pages_and_health() {
    let app = TestApp::new();
    for path in ["/about", "/login", "/admin/hero"] {
        let (status, headers, _) = app.send(get(path)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    }

    let (status, body) = app.json(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
