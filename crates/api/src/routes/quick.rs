//! Route definitions for the quick-add endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::quick;
use crate::state::AppState;

/// Routes mounted at `/quick`.
///
/// ```text
/// POST /win        -> merge a win into today's entry
/// POST /gratitude  -> merge a gratitude note into today's entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/win", post(quick::quick_add_win))
        .route("/gratitude", post(quick::quick_add_gratitude))
}
