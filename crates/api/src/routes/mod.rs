pub mod health;
pub mod revisions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /revisions                  recent edits across the site
/// /revisions/{post_id}        revision list (GET), revert / delete (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/revisions", revisions::router())
}
