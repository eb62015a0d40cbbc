//! Category model and DTOs.
//!
//! Categories organize entries (Work, Health, Personal, ...). They are
//! user-specific; names are unique per user, case-insensitively.

use dailywins_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Hex color for UI display, e.g. `#007bff`.
    pub color: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// A category joined with the number of entries it is attached to.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryWithCount {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub description: String,
    pub created_at: Timestamp,
    pub entry_count: i64,
}

/// DTO for creating a new category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}
