use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::ordered::OrderedEntity;
use crate::models::{NewProject, Project};

impl OrderedEntity for Project {
    const TABLE: &'static str = "projects";
}

pub async fn create(pool: &SqlitePool, project: &NewProject) -> Result<Project, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (title, description, role, year, image, url, display_order, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.role)
    .bind(&project.year)
    .bind(&project.image)
    .bind(&project.url)
    .bind(project.display_order)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Write every mutable column of `project` and refresh `updated_at`.
/// Returns `None` if the row no longer exists.
pub async fn update(pool: &SqlitePool, project: &Project) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects
         SET title = ?, description = ?, role = ?, year = ?, image = ?, url = ?,
             display_order = ?, updated_at = ?
         WHERE id = ? RETURNING *",
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.role)
    .bind(&project.year)
    .bind(&project.image)
    .bind(&project.url)
    .bind(project.display_order)
    .bind(Utc::now())
    .bind(project.id)
    .fetch_optional(pool)
    .await
}
