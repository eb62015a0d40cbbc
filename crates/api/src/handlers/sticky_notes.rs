//! Handlers for the `/sticky-notes` resource.
//!
//! Sticky notes are scratch capture: ordered, ephemeral, and either
//! deleted or "completed" into a win on today's entry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use dailywins_core::error::CoreError;
use dailywins_core::types::DbId;
use dailywins_core::wins::format_win_bullets;
use dailywins_db::models::entry::{Entry, EntryChanges};
use dailywins_db::models::sticky_note::StickyNote;
use dailywins_db::repositories::{EntryRepo, StickyNoteRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating or updating a sticky note.
#[derive(Debug, Deserialize)]
pub struct StickyNoteRequest {
    #[serde(default)]
    pub content: String,
}

/// GET /api/v1/sticky-notes
///
/// List the user's sticky notes in display order.
pub async fn list_sticky_notes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<StickyNote>>>> {
    let notes = StickyNoteRepo::list(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /api/v1/sticky-notes
///
/// Create a note at the end of the user's list.
pub async fn create_sticky_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<StickyNoteRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StickyNote>>)> {
    let content = input.content.trim();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Sticky note content cannot be empty.".into(),
        )));
    }

    let note = StickyNoteRepo::create(&state.pool, auth_user.user_id, content).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// PUT /api/v1/sticky-notes/{id}
///
/// Replace a note's content. Saving a note as empty deletes it (204);
/// otherwise the updated note is returned.
pub async fn update_sticky_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<StickyNoteRequest>,
) -> AppResult<Response> {
    let content = input.content.trim();

    if content.is_empty() {
        let deleted = StickyNoteRepo::delete(&state.pool, auth_user.user_id, id).await?;
        if !deleted {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Sticky note",
                id,
            }));
        }
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let note = StickyNoteRepo::update_content(&state.pool, auth_user.user_id, id, content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sticky note",
            id,
        }))?;
    Ok(Json(DataResponse { data: note }).into_response())
}

/// POST /api/v1/sticky-notes/{id}/complete
///
/// Promote a note into a win on today's entry, then delete the note.
/// Returns the updated entry.
pub async fn complete_sticky_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let note = StickyNoteRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sticky note",
            id,
        }))?;

    let today = Utc::now().date_naive();
    let entry = EntryRepo::get_or_create_for_date(&state.pool, auth_user.user_id, today).await?;

    let mut changes = EntryChanges::default();
    if entry.title.is_empty() {
        changes.title = Some(note.content.clone());
    } else {
        let combined = if entry.content.is_empty() {
            note.content.clone()
        } else {
            format!("{}\n{}", entry.content, note.content)
        };
        changes.content = Some(format_win_bullets(&combined));
    }

    // Record the win and remove the note atomically; a failure between
    // the two must not leave the note alive after the win landed.
    let mut tx = state.pool.begin().await?;
    let entry = EntryRepo::update(&mut *tx, auth_user.user_id, entry.id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entry",
            id: entry.id,
        }))?;
    StickyNoteRepo::delete(&mut *tx, auth_user.user_id, id).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/sticky-notes/{id}
///
/// Discard a note. Returns 204 No Content.
pub async fn delete_sticky_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StickyNoteRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Sticky note",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
