use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::content::HOME_KEY;
use crate::error::AppError;
use crate::extract::Json;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ContentRequest {
    /// `None` when the key is missing; an empty string is a valid value.
    pub content: Option<String>,
}

#[derive(Serialize)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Serialize)]
pub struct ContentUpdated {
    pub message: String,
    pub content: String,
}

pub async fn get_home(State(state): State<SharedState>) -> Result<Json<ContentResponse>, AppError> {
    let content = db::content::get_value(&state.pool, HOME_KEY).await?;
    Ok(Json(ContentResponse { content }))
}

pub async fn put_home(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ContentRequest>,
) -> Result<Json<ContentUpdated>, AppError> {
    let value = req
        .content
        .ok_or_else(|| AppError::BadRequest("Content is required".to_string()))?;

    let stored = db::content::upsert(&state.pool, HOME_KEY, &value).await?;

    tracing::info!(
        key = HOME_KEY,
        bytes = stored.value.len(),
        user_id = auth.user_id,
        "Content updated"
    );

    Ok(Json(ContentUpdated {
        message: "Content updated successfully".to_string(),
        content: stored.value,
    }))
}
