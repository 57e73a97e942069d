use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Patch;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub role: Option<String>,
    pub year: Option<String>,
    /// Public path of a managed upload (`/uploads/...`) or an external reference.
    pub image: Option<String>,
    pub url: Option<String>,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub role: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub role: Patch<String>,
    pub year: Patch<String>,
    pub image: Patch<String>,
    pub url: Patch<String>,
    pub display_order: Patch<i64>,
}

impl Project {
    /// Merge a partial update into this record. `title` and `display_order`
    /// are not nullable, so `Null` leaves them unchanged; callers reject that
    /// case before getting here.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Patch::Value(title) = patch.title {
            self.title = title;
        }
        patch.description.apply_to(&mut self.description);
        patch.role.apply_to(&mut self.role);
        patch.year.apply_to(&mut self.year);
        patch.image.apply_to(&mut self.image);
        patch.url.apply_to(&mut self.url);
        if let Patch::Value(order) = patch.display_order {
            self.display_order = order;
        }
    }
}
