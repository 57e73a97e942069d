use sqlx::SqlitePool;

use crate::auth::password;
use crate::config::AdminSeed;
use crate::db;
use crate::error::AppError;

/// Create the admin account if no user exists yet. Returns whether one was created.
pub async fn seed_admin(pool: &SqlitePool, seed: &AdminSeed) -> Result<bool, AppError> {
    if db::users::count_all(pool).await? > 0 {
        return Ok(false);
    }

    if seed.password.len() < password::MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Admin password must be at least {} characters",
            password::MIN_PASSWORD_LEN
        )));
    }

    let pw_hash = password::hash(&seed.password).map_err(AppError::Internal)?;
    let user = db::users::create(pool, &seed.username, &seed.email, &pw_hash).await?;

    tracing::info!(user_id = user.id, username = %user.username, "Admin account created");
    Ok(true)
}
