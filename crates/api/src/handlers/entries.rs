//! Handlers for the `/entries` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use dailywins_core::error::CoreError;
use dailywins_core::mood::validate_mood_rating;
use dailywins_core::types::DbId;
use dailywins_core::validation::validate_entry_fields;
use dailywins_db::models::category::Category;
use dailywins_db::models::entry::{Entry, EntryChanges, EntryFilter, NewEntry};
use dailywins_db::repositories::EntryRepo;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Entries per page in the list view.
const PAGE_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /entries`.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Restrict to entries attached to this category.
    pub category: Option<DbId>,
    /// Case-insensitive substring search over title and content.
    pub q: Option<String>,
    /// `"wins"` or `"gratitude"`.
    pub has_content: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
}

/// Request body for `POST /entries`.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub gratitude_text: String,
    pub mood_rating: Option<i32>,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
}

/// Request body for `PUT /entries/{id}`. Omitted fields are left
/// unchanged; `entry_date` and `mood_rating` can be set to `null` to
/// clear them.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub entry_date: Option<Option<NaiveDate>>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub gratitude_text: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub mood_rating: Option<Option<i32>>,
    pub category_ids: Option<Vec<DbId>>,
}

/// An entry together with its attached categories.
#[derive(Debug, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub categories: Vec<Category>,
}

/// Distinguishes an absent JSON field (outer `None`) from an explicit
/// `null` (inner `None`). Pair with `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/entries
///
/// Paginated list of the user's entries, newest first, with optional
/// category / search / content filters.
pub async fn list_entries(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListEntriesQuery>,
) -> AppResult<Json<PageResponse<Entry>>> {
    let filter = EntryFilter {
        category: params.category,
        q: params.q,
        has_content: params.has_content,
    };
    let page = params.page.unwrap_or(1).max(1);

    let total = EntryRepo::count(&state.pool, auth_user.user_id, &filter).await?;
    let pages = (total + PAGE_SIZE - 1) / PAGE_SIZE;
    let pages = pages.max(1);

    let offset = (page - 1) * PAGE_SIZE;
    let entries = EntryRepo::list(&state.pool, auth_user.user_id, &filter, PAGE_SIZE, offset)
        .await?;

    Ok(Json(PageResponse {
        data: entries,
        page,
        pages,
        total,
    }))
}

/// POST /api/v1/entries
///
/// Create an entry. Rejects entries with no meaningful content and
/// enforces the one-entry-per-day rule.
pub async fn create_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<EntryDetail>>)> {
    validate_entry_fields(
        Some(&input.title),
        Some(&input.content),
        Some(&input.gratitude_text),
        input.mood_rating,
    )
    .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(rating) = input.mood_rating {
        validate_mood_rating(rating).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let entry = EntryRepo::create(
        &state.pool,
        auth_user.user_id,
        &NewEntry {
            entry_date: input.entry_date,
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
            gratitude_text: input.gratitude_text.trim().to_string(),
            mood_rating: input.mood_rating,
        },
    )
    .await?;

    attach_categories(&state, auth_user.user_id, entry.id, &input.category_ids).await?;

    let detail = load_detail(&state, entry).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/entries/{id}
///
/// Fetch one entry with its categories. Another user's entry is a 404.
pub async fn get_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EntryDetail>>> {
    let entry = EntryRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    let detail = load_detail(&state, entry).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/entries/{id}
///
/// Update an entry. The entry as it would look after the update must
/// still carry some content.
pub async fn update_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntryRequest>,
) -> AppResult<Json<DataResponse<EntryDetail>>> {
    let existing = EntryRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    // Validate the entry as it will exist after the update.
    let title = input.title.as_deref().unwrap_or(&existing.title);
    let content = input.content.as_deref().unwrap_or(&existing.content);
    let gratitude = input
        .gratitude_text
        .as_deref()
        .unwrap_or(&existing.gratitude_text);
    let mood = match input.mood_rating {
        Some(new) => new,
        None => existing.mood_rating,
    };

    validate_entry_fields(Some(title), Some(content), Some(gratitude), mood)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(rating) = mood {
        validate_mood_rating(rating).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let changes = EntryChanges {
        entry_date: input.entry_date,
        title: input.title.map(|s| s.trim().to_string()),
        content: input.content.map(|s| s.trim().to_string()),
        gratitude_text: input.gratitude_text.map(|s| s.trim().to_string()),
        mood_rating: input.mood_rating,
    };

    let entry = EntryRepo::update(&state.pool, auth_user.user_id, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    if let Some(category_ids) = &input.category_ids {
        attach_categories(&state, auth_user.user_id, entry.id, category_ids).await?;
    }

    let detail = load_detail(&state, entry).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/entries/{id}
///
/// Delete an entry. Returns 204 No Content.
pub async fn delete_entry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EntryRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Entry", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Replace an entry's category attachments, rejecting categories the
/// user does not own.
pub(crate) async fn attach_categories(
    state: &AppState,
    user_id: DbId,
    entry_id: DbId,
    category_ids: &[DbId],
) -> AppResult<()> {
    let ok = EntryRepo::set_categories(&state.pool, user_id, entry_id, category_ids).await?;
    if !ok {
        return Err(AppError::Core(CoreError::Validation(
            "You can only assign your own categories to your entries.".into(),
        )));
    }
    Ok(())
}

/// Load an entry's categories and wrap both in an [`EntryDetail`].
pub(crate) async fn load_detail(state: &AppState, entry: Entry) -> AppResult<EntryDetail> {
    let categories = EntryRepo::categories_for_entry(&state.pool, entry.id).await?;
    Ok(EntryDetail { entry, categories })
}
