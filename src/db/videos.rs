use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::ordered::OrderedEntity;
use crate::models::{NewVideo, Video};

impl OrderedEntity for Video {
    const TABLE: &'static str = "videos";
}

pub async fn create(pool: &SqlitePool, video: &NewVideo) -> Result<Video, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Video>(
        "INSERT INTO videos (url, title, display_order, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&video.url)
    .bind(&video.title)
    .bind(video.display_order)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &SqlitePool, video: &Video) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        "UPDATE videos SET url = ?, title = ?, display_order = ?, updated_at = ?
         WHERE id = ? RETURNING *",
    )
    .bind(&video.url)
    .bind(&video.title)
    .bind(video.display_order)
    .bind(Utc::now())
    .bind(video.id)
    .fetch_optional(pool)
    .await
}
