pub mod auth;
pub mod content;
pub mod projects;
pub mod videos;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/change-password", post(auth::change_password))
        // Projects
        .route("/projects", get(projects::list).post(projects::create))
        .route("/projects/reorder", post(projects::reorder))
        .route(
            "/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Videos
        .route("/videos", get(videos::list).post(videos::create))
        .route("/videos/reorder", post(videos::reorder))
        .route(
            "/videos/{id}",
            get(videos::get).put(videos::update).delete(videos::delete),
        )
        // Content
        .route("/content/home", get(content::get_home).put(content::put_home))
}
