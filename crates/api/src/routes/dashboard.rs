//! Route definitions for the dashboards.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /weekly    -> 7-day strip + entries + average mood (?week_offset=)
/// GET /calendar  -> Monday-first month grid (?year=&month=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weekly", get(dashboard::weekly_dashboard))
        .route("/calendar", get(dashboard::calendar_dashboard))
}
