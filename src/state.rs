use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::uploads::UploadStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub uploads: UploadStore,
    pub login_limiter: LoginRateLimiter,
}
