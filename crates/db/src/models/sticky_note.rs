//! Sticky note model.
//!
//! Ephemeral scratch notes kept in a user-defined order. A note is either
//! deleted outright or "completed", which promotes it into a win entry.

use dailywins_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sticky_notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StickyNote {
    pub id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub position: i32,
    pub created_at: Timestamp,
}
