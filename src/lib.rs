pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod forms;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod seed;
pub mod state;
pub mod uploads;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};
use crate::uploads::UploadStore;

pub fn build_app(pool: SqlitePool, config: Config) -> Router {
    let uploads = UploadStore::new(config.upload_dir.clone());
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        uploads,
        login_limiter: LoginRateLimiter::new(),
    });

    Router::new()
        .nest("/api", routes::api_routes().route("/health", get(health)))
        .route("/health", get(health))
        .nest_service("/uploads", ServeDir::new(state.uploads.root()))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}
