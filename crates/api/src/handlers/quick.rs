//! Handlers for the quick-add endpoints.
//!
//! Quick add is the low-friction capture path: a win or gratitude note is
//! merged into today's entry (created blank on first use) without going
//! through the full entry form.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use dailywins_core::error::CoreError;
use dailywins_core::wins::format_win_bullets;
use dailywins_db::models::entry::{Entry, EntryChanges};
use dailywins_db::repositories::EntryRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /quick/win`.
#[derive(Debug, Deserialize)]
pub struct QuickWinRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Request body for `POST /quick/gratitude`.
#[derive(Debug, Deserialize)]
pub struct QuickGratitudeRequest {
    #[serde(default)]
    pub gratitude_text: String,
}

/// POST /api/v1/quick/win
///
/// Record a win for today. The title fills today's entry title if it is
/// still blank; otherwise the win is appended to the entry content as a
/// bullet line.
pub async fn quick_add_win(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<QuickWinRequest>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let title = input.title.trim();
    let extra = input.content.trim();
    if title.is_empty() && extra.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please enter a win before adding it.".into(),
        )));
    }

    let today = Utc::now().date_naive();
    let entry = EntryRepo::get_or_create_for_date(&state.pool, auth_user.user_id, today).await?;

    let mut changes = EntryChanges::default();

    // The first quick win of the day becomes the entry title; later ones
    // stack up in the content as bullets.
    let mut new_lines: Vec<&str> = Vec::new();
    if !title.is_empty() {
        if entry.title.is_empty() {
            changes.title = Some(title.to_string());
        } else {
            new_lines.push(title);
        }
    }
    if !extra.is_empty() {
        new_lines.push(extra);
    }

    if !new_lines.is_empty() {
        let mut combined = entry.content.clone();
        for line in new_lines {
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(line);
        }
        changes.content = Some(format_win_bullets(&combined));
    }

    let entry = EntryRepo::update(&state.pool, auth_user.user_id, entry.id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entry",
            id: entry.id,
        }))?;

    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/quick/gratitude
///
/// Record a gratitude note for today, appended to any existing note.
pub async fn quick_add_gratitude(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<QuickGratitudeRequest>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let text = input.gratitude_text.trim();
    if text.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please enter what you're grateful for.".into(),
        )));
    }

    let today = Utc::now().date_naive();
    let entry = EntryRepo::get_or_create_for_date(&state.pool, auth_user.user_id, today).await?;

    let gratitude = if entry.gratitude_text.is_empty() {
        text.to_string()
    } else {
        format!("{}\n{}", entry.gratitude_text, text)
    };

    let entry = EntryRepo::update(
        &state.pool,
        auth_user.user_id,
        entry.id,
        &EntryChanges {
            gratitude_text: Some(gratitude),
            ..EntryChanges::default()
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Entry",
        id: entry.id,
    }))?;

    Ok(Json(DataResponse { data: entry }))
}
