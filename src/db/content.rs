use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Content;

pub const HOME_KEY: &str = "home_content";

pub async fn find(pool: &SqlitePool, key: &str) -> Result<Option<Content>, sqlx::Error> {
    sqlx::query_as::<_, Content>("SELECT * FROM content WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Stored value, or an empty string when the key was never written.
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<String, sqlx::Error> {
    Ok(find(pool, key).await?.map(|c| c.value).unwrap_or_default())
}

pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> Result<Content, sqlx::Error> {
    sqlx::query_as::<_, Content>(
        "INSERT INTO content (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
         RETURNING *",
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}
