//! Shared test harness: app construction, a stub upload gateway, and
//! HTTP helpers.
//!
//! Mirrors the router construction in `main.rs` (via
//! `build_app_router`) so integration tests exercise the same
//! middleware stack that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use vitrine_core::types::MediaKind;
use vitrine_media::{MediaGateway, UploadError, UploadedMedia};

use vitrine_api::auth::password::hash_password;
use vitrine_api::config::{AdminSeedConfig, ServerConfig, SessionConfig};
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_db::models::user::CreateUser;
use vitrine_db::repositories::UserRepo;

/// Stub upload gateway: every file lands at a deterministic fake URL
/// unless its filename is in `reject`, in which case the "service"
/// reports a size-limit rejection. Filenames ending in `.mp4` come
/// back as videos.
pub struct StubGateway {
    pub reject: Vec<String>,
}

impl StubGateway {
    pub fn accepting() -> Self {
        Self { reject: Vec::new() }
    }

    pub fn rejecting(filenames: &[&str]) -> Self {
        Self {
            reject: filenames.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[async_trait]
impl MediaGateway for StubGateway {
    async fn upload(&self, _bytes: Vec<u8>, filename: &str) -> Result<UploadedMedia, UploadError> {
        if self.reject.iter().any(|r| r == filename) {
            return Err(UploadError::Rejected {
                status: 400,
                message: "File size too large".into(),
            });
        }
        let kind = if filename.ends_with(".mp4") {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        Ok(UploadedMedia {
            url: format!("https://media.test/{filename}"),
            kind,
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: "site".to_string(),
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough".to_string(),
            ttl_mins: 60,
        },
        admin: AdminSeedConfig {
            username: "curator".to_string(),
            password: "seed_password_123!".to_string(),
        },
    }
}

/// Build the full application router with an accepting stub gateway.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_gateway(pool, StubGateway::accepting())
}

/// Build the full application router with the given stub gateway.
pub fn build_test_app_with_gateway(pool: PgPool, gateway: StubGateway) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway: Arc::new(gateway),
    };
    build_app_router(state, &config)
}

/// Create the admin user directly in the database and return the
/// plaintext password used.
pub async fn create_admin(pool: &PgPool, username: &str) -> String {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hashed,
        },
    )
    .await
    .expect("user creation should succeed");
    password.to_string()
}

/// Log in via the API and return the session token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("token in response").to_string()
}

/// Create the admin and log in, returning the session token.
pub async fn create_admin_and_login(pool: &PgPool, app: Router) -> String {
    let password = create_admin(pool, "curator").await;
    login(app, "curator", &password).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::get(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::get(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Request::put(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::delete(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    form: &MultipartForm,
) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, form.content_type())
            .body(Body::from(form.body()))
            .unwrap(),
    )
    .await
}

pub async fn put_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    form: &MultipartForm,
) -> Response<Body> {
    send(
        app,
        Request::put(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, form.content_type())
            .body(Body::from(form.body()))
            .unwrap(),
    )
    .await
}

/// Collect a response body as a UTF-8 string.
pub async fn body_text(response: Response<Body>) -> String {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Multipart form builder
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Minimal multipart/form-data builder for tests.
#[derive(Default)]
pub struct MultipartForm {
    parts: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.parts.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.parts.extend_from_slice(bytes);
        self.parts.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn body(&self) -> Vec<u8> {
        let mut body = self.parts.clone();
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}
