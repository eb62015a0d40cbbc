//! Handlers for the weekly and calendar dashboards.

use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Days, NaiveDate, Utc};
use dailywins_core::calendar::{build_month_grid, build_week, week_start, DaySummary, MonthDay};
use dailywins_core::mood::average_mood;
use dailywins_db::models::entry::Entry;
use dailywins_db::repositories::EntryRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /dashboard/weekly`.
#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    /// Weeks relative to the current one: 0 = this week, -1 = last week.
    pub week_offset: Option<i64>,
}

/// Query parameters for `GET /dashboard/calendar`.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Payload of the weekly dashboard.
#[derive(Debug, Serialize)]
pub struct WeeklyDashboard {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub week_offset: i64,
    /// Exactly 7 day summaries, Monday first.
    pub days: Vec<DaySummary>,
    /// Entries within the week, oldest first.
    pub entries: Vec<Entry>,
    /// Mean mood over the week's rated entries, one decimal place.
    /// Absent when no entry in range has a rating.
    pub average_mood: Option<f64>,
}

/// Payload of the month calendar.
#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub today: NaiveDate,
    /// Monday-first rows of 7 cells, padded to full weeks.
    pub weeks: Vec<Vec<MonthDay>>,
}

/// GET /api/v1/dashboard/weekly
///
/// The 7-day week strip for `week_offset` weeks from now, with that
/// week's entries and average mood.
pub async fn weekly_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<WeeklyQuery>,
) -> AppResult<Json<DataResponse<WeeklyDashboard>>> {
    let week_offset = params.week_offset.unwrap_or(0);
    let today = Utc::now().date_naive();

    let out_of_range =
        || AppError::BadRequest(format!("week_offset {week_offset} is out of range"));
    let start = week_start(today, week_offset).ok_or_else(out_of_range)?;
    let end = start.checked_add_days(Days::new(6)).ok_or_else(out_of_range)?;

    let entries = EntryRepo::list_between(&state.pool, auth_user.user_id, start, end).await?;

    let entry_dates: HashSet<NaiveDate> =
        entries.iter().filter_map(|e| e.entry_date).collect();
    let days = build_week(today, week_offset, &entry_dates).ok_or_else(out_of_range)?;

    let ratings: Vec<i32> = entries.iter().filter_map(|e| e.mood_rating).collect();
    let average = average_mood(&ratings);

    Ok(Json(DataResponse {
        data: WeeklyDashboard {
            week_start: start,
            week_end: end,
            week_offset,
            days,
            entries,
            average_mood: average,
        },
    }))
}

/// GET /api/v1/dashboard/calendar
///
/// Monday-first month grid annotated with entry presence. Defaults to
/// the current month; an invalid year/month is a 400.
pub async fn calendar_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CalendarQuery>,
) -> AppResult<Json<DataResponse<CalendarMonth>>> {
    let today = Utc::now().date_naive();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    // The grid is padded to full weeks, so fetch a little beyond the
    // month on both sides.
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid year/month: {year}-{month}")))?;
    let fetch_start = first - Days::new(7);
    let fetch_end = first + Days::new(45);

    let dates =
        EntryRepo::dates_between(&state.pool, auth_user.user_id, fetch_start, fetch_end).await?;
    let entry_dates: HashSet<NaiveDate> = dates.into_iter().collect();

    let weeks = build_month_grid(year, month, today, &entry_dates)
        .map_err(AppError::BadRequest)?;

    Ok(Json(DataResponse {
        data: CalendarMonth {
            year,
            month,
            today,
            weeks,
        },
    }))
}
