//! Daily entry model and DTOs.
//!
//! One entry per user per day, tracking wins, mood, and gratitude. All
//! content fields are optional to reduce friction; the API layer rejects
//! entries with no meaningful content at all.

use chrono::NaiveDate;
use dailywins_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `entries` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Entry {
    pub id: DbId,
    pub user_id: DbId,
    pub entry_date: Option<NaiveDate>,
    pub title: String,
    pub content: String,
    pub gratitude_text: String,
    pub mood_rating: Option<i32>,
    pub is_private: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entry {
    /// Whether the entry carries any content worth showing on a calendar.
    pub fn has_content(&self) -> bool {
        !self.title.is_empty()
            || !self.content.is_empty()
            || !self.gratitude_text.is_empty()
            || self.mood_rating.is_some()
    }
}

/// Field values for inserting a new entry row.
#[derive(Debug, Default)]
pub struct NewEntry {
    pub entry_date: Option<NaiveDate>,
    pub title: String,
    pub content: String,
    pub gratitude_text: String,
    pub mood_rating: Option<i32>,
}

/// Field updates for an existing entry. `None` leaves a column unchanged.
///
/// `mood_rating` is double-wrapped: the outer `Option` is "change or not",
/// the inner one is the new nullable value.
#[derive(Debug, Default)]
pub struct EntryChanges {
    pub entry_date: Option<Option<NaiveDate>>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub gratitude_text: Option<String>,
    pub mood_rating: Option<Option<i32>>,
}

/// Filters for the paginated entry list.
#[derive(Debug, Default, Deserialize)]
pub struct EntryFilter {
    /// Restrict to entries attached to this category.
    pub category: Option<DbId>,
    /// Case-insensitive substring search over title and content.
    pub q: Option<String>,
    /// `"wins"` keeps entries with win content, `"gratitude"` those with a
    /// gratitude note.
    pub has_content: Option<String>,
}
