use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Patch;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewVideo {
    pub url: String,
    pub title: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    pub url: Patch<String>,
    pub title: Patch<String>,
    pub display_order: Patch<i64>,
}

impl Video {
    pub fn apply(&mut self, patch: VideoPatch) {
        if let Patch::Value(url) = patch.url {
            self.url = url;
        }
        patch.title.apply_to(&mut self.title);
        if let Patch::Value(order) = patch.display_order {
            self.display_order = order;
        }
    }
}
