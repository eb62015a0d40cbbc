pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod day;
pub mod entries;
pub mod health;
pub mod quick;
pub mod sticky_notes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /categories                          list, create
/// /categories/{id}                     update, delete
///
/// /entries                             list (?category=&q=&has_content=&page=), create
/// /entries/{id}                        get, update, delete
///
/// /quick/win                           quick-add a win to today (POST)
/// /quick/gratitude                     quick-add gratitude to today (POST)
///
/// /day/{date}                          day modal snapshot (GET), save (POST)
///
/// /dashboard/weekly                    week strip + entries + average mood
/// /dashboard/calendar                  month grid (?year=&month=)
///
/// /sticky-notes                        list, create
/// /sticky-notes/{id}                   update, delete
/// /sticky-notes/{id}/complete          promote into today's win (POST)
/// ```
///
/// Everything except `/auth/register`, `/auth/login`, and `/auth/refresh`
/// requires a Bearer token; all data routes are scoped to the
/// authenticated user.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/entries", entries::router())
        .nest("/quick", quick::router())
        .nest("/day", day::router())
        .nest("/dashboard", dashboard::router())
        .nest("/sticky-notes", sticky_notes::router())
}
