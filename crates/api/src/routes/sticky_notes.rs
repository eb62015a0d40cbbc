//! Route definitions for the `/sticky-notes` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::sticky_notes;
use crate::state::AppState;

/// Routes mounted at `/sticky-notes`.
///
/// ```text
/// GET    /                -> list in display order
/// POST   /                -> create at end of list
/// PUT    /{id}            -> replace content (empty content deletes)
/// DELETE /{id}            -> discard
/// POST   /{id}/complete   -> promote into today's win, then delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sticky_notes::list_sticky_notes).post(sticky_notes::create_sticky_note),
        )
        .route(
            "/{id}",
            put(sticky_notes::update_sticky_note).delete(sticky_notes::delete_sticky_note),
        )
        .route("/{id}/complete", post(sticky_notes::complete_sticky_note))
}
