use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{Json, Path};
use crate::forms::{self, FormData, IMAGE_FIELD};
use crate::models::{NewProject, Patch, Project, ProjectPatch};
use crate::state::SharedState;
use crate::uploads::PUBLIC_PREFIX;

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}

/// Read the editable fields. An `image` text value may point at an external
/// resource, but never into the managed upload directory: those paths are
/// only ever produced by storing a file.
fn project_patch(form: &FormData) -> Result<ProjectPatch, AppError> {
    let image = match forms::text(&form.fields, IMAGE_FIELD)? {
        Patch::Value(path) if path.trim().is_empty() => Patch::Absent,
        Patch::Value(path) if path.starts_with(PUBLIC_PREFIX) => {
            return Err(AppError::BadRequest(
                "Uploaded images must be sent as a file".to_string(),
            ));
        }
        other => other,
    };

    Ok(ProjectPatch {
        title: forms::text(&form.fields, "title")?,
        description: forms::text(&form.fields, "description")?,
        role: forms::text(&form.fields, "role")?,
        year: forms::text(&form.fields, "year")?,
        image,
        url: forms::text(&form.fields, "url")?,
        display_order: forms::integer(&form.fields, "display_order")?,
    })
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = db::ordered::list::<Project>(&state.pool).await?;
    Ok(Json(projects))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let project = db::ordered::find_by_id::<Project>(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let form = forms::parse(&headers, body).await?;
    let patch = project_patch(&form)?;

    let title = match patch.title {
        Patch::Value(title) if !title.trim().is_empty() => title,
        _ => return Err(AppError::BadRequest("Title is required".to_string())),
    };

    let mut new_project = NewProject {
        title,
        description: patch.description.into_non_empty(),
        role: patch.role.into_non_empty(),
        year: patch.year.into_non_empty(),
        image: patch.image.into_non_empty(),
        url: patch.url.into_non_empty(),
        display_order: patch.display_order.into_option().unwrap_or(0),
    };

    let stored = match &form.image {
        Some(upload) => Some(state.uploads.save(upload).await?),
        None => None,
    };
    if let Some(path) = &stored {
        new_project.image = Some(path.clone());
    }

    let project = match db::projects::create(&state.pool, &new_project).await {
        Ok(project) => project,
        Err(e) => {
            if let Some(path) = &stored {
                state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(project_id = project.id, user_id = auth.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Project>, AppError> {
    let form = forms::parse(&headers, body).await?;
    let mut patch = project_patch(&form)?;

    match &patch.title {
        Patch::Null => return Err(AppError::BadRequest("Title is required".to_string())),
        Patch::Value(title) if title.trim().is_empty() => {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        _ => {}
    }
    if patch.display_order == Patch::Null {
        return Err(AppError::BadRequest(
            "display_order must be an integer".to_string(),
        ));
    }

    let mut project = db::ordered::find_by_id::<Project>(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let previous_image = project.image.clone();

    // New file first, then the row; the old file goes only once the row
    // no longer points at it.
    let stored = match &form.image {
        Some(upload) => Some(state.uploads.save(upload).await?),
        None => None,
    };
    if let Some(path) = &stored {
        patch.image = Patch::Value(path.clone());
    }

    project.apply(patch);

    let result = match db::projects::update(&state.pool, &project).await {
        Ok(Some(updated)) => Ok(updated),
        Ok(None) => Err(not_found()),
        Err(e) => Err(AppError::from(e)),
    };
    let updated = match result {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(path) = &stored {
                state.uploads.remove(path).await;
            }
            return Err(e);
        }
    };

    if let Some(previous) = previous_image.as_deref() {
        if updated.image.as_deref() != Some(previous) {
            state.uploads.remove(previous).await;
        }
    }

    tracing::info!(project_id = updated.id, user_id = auth.user_id, "Project updated");

    Ok(Json(updated))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = db::ordered::find_by_id::<Project>(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    if !db::ordered::delete::<Project>(&state.pool, id).await? {
        return Err(not_found());
    }

    if let Some(image) = project.image.as_deref() {
        state.uploads.remove(image).await;
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");

    Ok(Json(
        serde_json::json!({ "message": "Project deleted successfully" }),
    ))
}

pub async fn reorder(
    auth: AuthUser,
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let fields = forms::parse_json_object(&body)?;
    let ids = forms::id_list(&fields, "projectIds")?;

    let updated = db::ordered::reorder::<Project>(&state.pool, &ids).await?;

    tracing::info!(
        requested = ids.len(),
        updated,
        user_id = auth.user_id,
        "Projects reordered"
    );

    Ok(Json(
        serde_json::json!({ "message": "Projects reordered successfully" }),
    ))
}
