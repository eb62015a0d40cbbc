//! Handlers for the day modal: get-or-create a day's entry and edit it in
//! place.

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use dailywins_core::error::CoreError;
use dailywins_core::mood::{mood_emoji, validate_mood_rating};
use dailywins_core::types::DbId;
use dailywins_core::validation::validate_entry_fields;
use dailywins_core::wins::format_win_preview;
use dailywins_db::models::category::Category;
use dailywins_db::models::entry::{Entry, EntryChanges};
use dailywins_db::repositories::EntryRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::entries::attach_categories;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Content preview length in the day snapshot.
const PREVIEW_LEN: usize = 100;

/// Request body for `POST /day/{date}`. Omitted fields are left
/// unchanged; `mood_rating: null` clears the mood.
#[derive(Debug, Default, Deserialize)]
pub struct DayUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub gratitude_text: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub mood_rating: Option<Option<i32>>,
    pub category_ids: Option<Vec<DbId>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// JSON snapshot of a day's entry, shaped for the modal dialog.
#[derive(Debug, Serialize)]
pub struct DaySnapshot {
    pub id: DbId,
    pub entry_date: Option<NaiveDate>,
    pub title: String,
    pub content: String,
    pub content_preview: String,
    pub gratitude_text: String,
    pub mood_rating: Option<i32>,
    pub mood_emoji: &'static str,
    pub has_content: bool,
    pub categories: Vec<Category>,
}

impl DaySnapshot {
    fn build(entry: Entry, categories: Vec<Category>) -> Self {
        Self {
            id: entry.id,
            entry_date: entry.entry_date,
            title: entry.title.clone(),
            content_preview: format_win_preview(&entry.content, PREVIEW_LEN),
            content: entry.content.clone(),
            gratitude_text: entry.gratitude_text.clone(),
            mood_rating: entry.mood_rating,
            mood_emoji: mood_emoji(entry.mood_rating),
            has_content: entry.has_content(),
            categories,
        }
    }
}

/// GET /api/v1/day/{date}
///
/// Get-or-create the day's entry and return its snapshot. A date the
/// user has not written on yet comes back as a blank entry.
pub async fn get_day(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(date): Path<String>,
) -> AppResult<Json<DataResponse<DaySnapshot>>> {
    let date = parse_date(&date)?;
    let entry = EntryRepo::get_or_create_for_date(&state.pool, auth_user.user_id, date).await?;
    let categories = EntryRepo::categories_for_entry(&state.pool, entry.id).await?;
    Ok(Json(DataResponse {
        data: DaySnapshot::build(entry, categories),
    }))
}

/// POST /api/v1/day/{date}
///
/// Validate and persist submitted fields on the day's entry, returning
/// the refreshed snapshot.
pub async fn update_day(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(date): Path<String>,
    Json(input): Json<DayUpdateRequest>,
) -> AppResult<Json<DataResponse<DaySnapshot>>> {
    let date = parse_date(&date)?;
    let entry = EntryRepo::get_or_create_for_date(&state.pool, auth_user.user_id, date).await?;

    // Validate the entry as it will exist after the update.
    let title = input.title.as_deref().unwrap_or(&entry.title);
    let content = input.content.as_deref().unwrap_or(&entry.content);
    let gratitude = input
        .gratitude_text
        .as_deref()
        .unwrap_or(&entry.gratitude_text);
    let mood = match input.mood_rating {
        Some(new) => new,
        None => entry.mood_rating,
    };

    validate_entry_fields(Some(title), Some(content), Some(gratitude), mood)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(rating) = mood {
        validate_mood_rating(rating).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let changes = EntryChanges {
        entry_date: None,
        title: input.title.map(|s| s.trim().to_string()),
        content: input.content.map(|s| s.trim().to_string()),
        gratitude_text: input.gratitude_text.map(|s| s.trim().to_string()),
        mood_rating: input.mood_rating,
    };

    let entry = EntryRepo::update(&state.pool, auth_user.user_id, entry.id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entry",
            id: entry.id,
        }))?;

    if let Some(category_ids) = &input.category_ids {
        attach_categories(&state, auth_user.user_id, entry.id, category_ids).await?;
    }

    let categories = EntryRepo::categories_for_entry(&state.pool, entry.id).await?;
    Ok(Json(DataResponse {
        data: DaySnapshot::build(entry, categories),
    }))
}

/// Parse a `YYYY-MM-DD` path segment, mapping failure to a 400.
fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{raw}'. Expected YYYY-MM-DD."))
    })
}
