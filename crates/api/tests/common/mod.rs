#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use festival_api::auth::jwt::{issue_access_token, JwtConfig};
use festival_core::roles::Role;
use jsonwebtoken::{encode, EncodingKey, Header};
use festival_api::config::ServerConfig;
use festival_api::router::build_app_router;
use festival_api::state::AppState;
use festival_api::storage::FileStore;

const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";
const BOUNDARY: &str = "festival-test-boundary";

/// The application under test plus the temporary directory its uploads go
/// to. The directory is removed when this is dropped.
pub struct TestApp {
    pub router: Router,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Number of stored files in an upload folder.
    pub fn stored_files(&self, folder: &str) -> usize {
        std::fs::read_dir(self.storage_dir.path().join(folder))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_dir: storage_dir.path().to_path_buf(),
        public_upload_prefix: "/uploads".to_string(),
        jwt: jwt_config(),
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("tempdir should be created");
    let config = test_config(&storage_dir);

    let state = AppState {
        pool,
        storage: Arc::new(FileStore::new(
            config.storage_dir.clone(),
            config.public_upload_prefix.clone(),
        )),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        storage_dir,
    }
}

/// A bearer token for a user with the given role name.
pub fn token(role: &str) -> String {
    let role: Role = role.parse().expect("role name should be known");
    issue_access_token(1, role, &jwt_config()).expect("token generation should succeed")
}

/// A correctly signed token whose role claim is `role` verbatim, known or not.
pub fn token_with_role_claim(role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = serde_json::json!({
        "sub": 1,
        "role": role,
        "exp": now + 600,
        "iat": now,
        "jti": "test-session",
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(
        app,
        builder(method, uri, token)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, Method::POST, uri, body, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, body, Some(token)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body, Some(token)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// A small PNG-typed file.
    pub fn png(self, name: &str, file_name: &str) -> Self {
        self.file(name, file_name, "image/png", b"\x89PNG\r\n\x1a\nfake")
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    form: MultipartBody,
    token: &str,
) -> Response<Body> {
    send(
        app,
        builder(method, uri, Some(token))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form.finish()))
            .unwrap(),
    )
    .await
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    form: MultipartBody,
    token: &str,
) -> Response<Body> {
    send_multipart(app, Method::POST, uri, form, token).await
}

pub async fn put_multipart(
    app: Router,
    uri: &str,
    form: MultipartBody,
    token: &str,
) -> Response<Body> {
    send_multipart(app, Method::PUT, uri, form, token).await
}
