#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;

use portfolio_cms::config::{Config, RegistrationMode};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "password123";

/// A running test server with its own in-memory database and upload dir.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed");
        read(resp).await
    }

    pub async fn register_raw(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(body)
            .send()
            .await
            .expect("register request failed");
        read(resp).await
    }

    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        read(resp).await
    }

    /// Register the admin account and return a token for it.
    pub async fn bootstrap(&self) -> String {
        let (body, status) = self.register(ADMIN_USERNAME, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED, "bootstrap register failed: {body}");
        let (body, status) = self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "bootstrap login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a project from a JSON body, return the project JSON.
    pub async fn create_project(&self, token: &str, body: &Value) -> Value {
        let (project, status) = self.post_auth("/api/projects", token, body).await;
        assert_eq!(status, StatusCode::CREATED, "create project failed: {project}");
        project
    }

    pub async fn create_video(&self, token: &str, body: &Value) -> Value {
        let (video, status) = self.post_auth("/api/videos", token, body).await;
        assert_eq!(status, StatusCode::CREATED, "create video failed: {video}");
        video
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        read(resp).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        read(resp).await
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        read(resp).await
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        read(resp).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        read(resp).await
    }

    pub async fn post_multipart(&self, path: &str, token: &str, form: Form) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("multipart post failed");
        read(resp).await
    }

    pub async fn put_multipart(&self, path: &str, token: &str, form: Form) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("multipart put failed");
        read(resp).await
    }

    /// On-disk location of a `/uploads/...` path returned by the API.
    pub fn stored_file(&self, public_path: &str) -> PathBuf {
        let name = public_path
            .strip_prefix("/uploads/")
            .expect("not a managed upload path");
        self.upload_dir.path().join(name)
    }

    pub fn stored_file_count(&self) -> usize {
        match std::fs::read_dir(self.upload_dir.path()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

async fn read(resp: reqwest::Response) -> (Value, StatusCode) {
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(json!(null));
    (body, status)
}

/// A multipart image part.
pub fn image_part(file_name: &str, mime: &str, data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .unwrap()
}

pub fn png_bytes() -> Vec<u8> {
    b"\x89PNG\r\n\x1a\nnot really a png".to_vec()
}

/// Single-connection in-memory database with migrations applied.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    portfolio_cms::db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_config(upload_dir: &TempDir) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        upload_dir: upload_dir.path().to_path_buf(),
        max_body_size: 6 * 1024 * 1024,
        token_ttl_hours: 1,
        registration: RegistrationMode::Open,
        log_level: "warn".to_string(),
        admin: None,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let pool = memory_pool().await;
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let mut config = test_config(&upload_dir);
    customize(&mut config);

    let app = portfolio_cms::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        upload_dir,
    }
}

pub async fn cleanup(app: TestApp) {
    app.pool.close().await;
}
