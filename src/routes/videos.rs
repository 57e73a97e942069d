use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{Json, Path};
use crate::forms::{self, FormData};
use crate::models::{NewVideo, Patch, Video, VideoPatch};
use crate::state::SharedState;

fn not_found() -> AppError {
    AppError::NotFound("Video not found".to_string())
}

fn video_patch(form: &FormData) -> Result<VideoPatch, AppError> {
    Ok(VideoPatch {
        url: forms::text(&form.fields, "url")?,
        title: forms::text(&form.fields, "title")?,
        display_order: forms::integer(&form.fields, "display_order")?,
    })
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Video>>, AppError> {
    let videos = db::ordered::list::<Video>(&state.pool).await?;
    Ok(Json(videos))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Video>, AppError> {
    let video = db::ordered::find_by_id::<Video>(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(video))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Video>), AppError> {
    let form = forms::parse(&headers, body).await?;
    let patch = video_patch(&form)?;

    let url = match patch.url {
        Patch::Value(url) if !url.trim().is_empty() => url,
        _ => return Err(AppError::BadRequest("URL is required".to_string())),
    };

    let new_video = NewVideo {
        url,
        title: patch.title.into_non_empty(),
        display_order: patch.display_order.into_option().unwrap_or(0),
    };
    let video = db::videos::create(&state.pool, &new_video).await?;

    tracing::info!(video_id = video.id, user_id = auth.user_id, "Video created");

    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Video>, AppError> {
    let form = forms::parse(&headers, body).await?;
    let patch = video_patch(&form)?;

    match &patch.url {
        Patch::Null => return Err(AppError::BadRequest("URL is required".to_string())),
        Patch::Value(url) if url.trim().is_empty() => {
            return Err(AppError::BadRequest("URL is required".to_string()));
        }
        _ => {}
    }
    if patch.display_order == Patch::Null {
        return Err(AppError::BadRequest(
            "display_order must be an integer".to_string(),
        ));
    }

    let mut video = db::ordered::find_by_id::<Video>(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    video.apply(patch);

    let updated = db::videos::update(&state.pool, &video)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(video_id = updated.id, user_id = auth.user_id, "Video updated");

    Ok(Json(updated))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::ordered::delete::<Video>(&state.pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(video_id = id, user_id = auth.user_id, "Video deleted");

    Ok(Json(
        serde_json::json!({ "message": "Video deleted successfully" }),
    ))
}

pub async fn reorder(
    auth: AuthUser,
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let fields = forms::parse_json_object(&body)?;
    let ids = forms::id_list(&fields, "videoIds")?;

    let updated = db::ordered::reorder::<Video>(&state.pool, &ids).await?;

    tracing::info!(
        requested = ids.len(),
        updated,
        user_id = auth.user_id,
        "Videos reordered"
    );

    Ok(Json(
        serde_json::json!({ "message": "Videos reordered successfully" }),
    ))
}
