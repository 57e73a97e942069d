//! Queries shared by every table that carries a `display_order` column.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

pub trait OrderedEntity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
}

/// All rows by `display_order`, newest first among equal orders.
pub async fn list<T: OrderedEntity>(pool: &SqlitePool) -> Result<Vec<T>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM {} ORDER BY display_order ASC, created_at DESC, id DESC",
        T::TABLE
    );
    sqlx::query_as::<_, T>(&sql).fetch_all(pool).await
}

pub async fn find_by_id<T: OrderedEntity>(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<T>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns false when no row had that id.
pub async fn delete<T: OrderedEntity>(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Give the i-th id `display_order = i`. Rows not listed keep their order;
/// ids with no row are skipped. Returns the number of rows updated.
pub async fn reorder<T: OrderedEntity>(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<u64, sqlx::Error> {
    let sql = format!("UPDATE {} SET display_order = ? WHERE id = ?", T::TABLE);

    let mut tx = pool.begin().await?;
    let mut updated = 0;
    for (position, id) in ids.iter().enumerate() {
        let result = sqlx::query(&sql)
            .bind(position as i64)
            .bind(*id)
            .execute(&mut *tx)
            .await?;
        updated += result.rows_affected();
    }
    tx.commit().await?;

    Ok(updated)
}
