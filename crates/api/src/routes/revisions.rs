//! Route definitions for post revision history.
//!
//! Registered under `/revisions`.

use axum::routing::get;
use axum::Router;

use crate::handlers::revisions;
use crate::state::AppState;

/// Revision routes, registered as `/revisions`.
///
/// ```text
/// GET    /             list_recent_edits
/// GET    /{post_id}    get_post_revisions
/// POST   /{post_id}    post_revision_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(revisions::list_recent_edits))
        .route(
            "/{post_id}",
            get(revisions::get_post_revisions).post(revisions::post_revision_action),
        )
}
