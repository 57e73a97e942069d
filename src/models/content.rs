use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Content {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
