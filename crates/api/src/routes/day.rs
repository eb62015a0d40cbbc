//! Route definitions for the day modal.

use axum::routing::get;
use axum::Router;

use crate::handlers::day;
use crate::state::AppState;

/// Routes mounted at `/day`.
///
/// ```text
/// GET  /{date}  -> get-or-create the day's entry, return snapshot
/// POST /{date}  -> save submitted fields, return refreshed snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{date}", get(day::get_day).post(day::update_day))
}
