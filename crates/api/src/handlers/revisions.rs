//! Handlers for post revision history.
//!
//! Provides the site-wide recent edits listing, the per-post revision list
//! and the revert / delete form target.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use qa_history_core::access::Capability;
use qa_history_core::error::CoreError;
use qa_history_core::history::{into_display_order, sequence};
use qa_history_core::paging::{
    clamp_limit, clamp_offset, DEFAULT_RECENT_EDITS_LIMIT, MAX_RECENT_EDITS_LIMIT,
};
use qa_history_core::presentation::{assemble_page, HistoryPage};
use qa_history_core::revert::{delete_revision, select_revert_target, RevisionAction};
use qa_history_core::revision::{PostType, Revision};
use qa_history_core::slug::post_path;
use qa_history_core::types::DbId;
use qa_history_db::models::edit_history::RecentEdit;
use qa_history_db::repositories::{PostRepo, RevisionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

/// Form body posted from the revision list.
#[derive(Debug, Deserialize)]
pub struct RevisionActionForm {
    pub revert: Option<String>,
    pub delete: Option<String>,
}

/// One row of the recent edits listing.
#[derive(Debug, Serialize)]
pub struct RecentEditView {
    #[serde(flatten)]
    pub edit: RecentEdit,
    pub history_url: String,
    pub post_url: Option<String>,
}

impl From<RecentEdit> for RecentEditView {
    fn from(edit: RecentEdit) -> Self {
        let post_url = post_path(
            PostType::from_code(&edit.post_type),
            edit.post_id,
            edit.parent_id,
            edit.title.as_deref().unwrap_or_default(),
        );
        Self {
            history_url: history_url(edit.post_id),
            post_url,
            edit,
        }
    }
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn history_url(post_id: DbId) -> String {
    format!("/api/v1/revisions/{post_id}")
}

/// Load a post's revisions oldest first, or 404 if the post does not exist.
async fn ensure_revisions(pool: &sqlx::PgPool, post_id: DbId) -> AppResult<Vec<Revision>> {
    let (_, revisions) = RevisionRepo::fetch_revisions(pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "post",
            id: post_id,
        }))?;
    Ok(revisions)
}

/* --------------------------------------------------------------------------
Listing
-------------------------------------------------------------------------- */

/// GET /revisions
///
/// Posts with at least one edit, most recently edited first.
pub async fn list_recent_edits(
    auth: OptionalAuth,
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    state
        .history
        .access
        .check(auth.viewer().as_ref(), Capability::ViewHistory)?;

    let limit = clamp_limit(params.limit, DEFAULT_RECENT_EDITS_LIMIT, MAX_RECENT_EDITS_LIMIT);
    let offset = clamp_offset(params.offset);

    let edits: Vec<RecentEditView> = RevisionRepo::list_recent_edits(&state.pool, limit, offset)
        .await?
        .into_iter()
        .map(RecentEditView::from)
        .collect();

    Ok(Json(DataResponse { data: edits }))
}

/// GET /revisions/{post_id}
///
/// The revision list of one post, most recent first.
pub async fn get_post_revisions(
    auth: OptionalAuth,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(post_id) = path?;
    let viewer = auth.viewer();
    state
        .history
        .access
        .check(viewer.as_ref(), Capability::ViewHistory)?;

    let revisions = ensure_revisions(&state.pool, post_id).await?;

    let mut author_ids: Vec<DbId> = revisions.iter().filter_map(|r| r.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let handles = UserRepo::handles_for_ids(&state.pool, &author_ids).await?;

    // Word alignment is CPU-bound; keep it off the async workers.
    let history = Arc::clone(&state.history);
    let mut page = tokio::task::spawn_blocking(move || -> Result<HistoryPage, CoreError> {
        let records = sequence(post_id, &revisions, &handles, &history)?;
        let live = revisions.last().ok_or(CoreError::NotFound {
            entity: "post",
            id: post_id,
        })?;
        Ok(assemble_page(
            post_id,
            live,
            into_display_order(records),
            Utc::now(),
            &history,
        ))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("History task failed: {e}")))??;

    // Hide the revert control from viewers who could not use it.
    let may_revert = state
        .history
        .access
        .check(viewer.as_ref(), Capability::RevertRevision)
        .is_ok();
    if !may_revert {
        for view in &mut page.revisions {
            view.can_revert = false;
            view.can_delete = false;
        }
    }

    Ok(Json(DataResponse { data: page }))
}

/* --------------------------------------------------------------------------
Mutations
-------------------------------------------------------------------------- */

/// POST /revisions/{post_id}
///
/// `revert=<index>` restores revision `index` through the ordinary edit path
/// and redirects back to the list; `delete=<index>` is refused with 501 for
/// every caller, before any access check.
pub async fn post_revision_action(
    auth: OptionalAuth,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    form: Result<Form<RevisionActionForm>, FormRejection>,
) -> AppResult<Response> {
    let Path(post_id) = path?;
    let Form(form) = form?;
    let action = RevisionAction::from_form(form.revert.as_deref(), form.delete.as_deref())?
        .ok_or_else(|| {
            AppError::BadRequest("Expected a 'revert' or 'delete' field".to_string())
        })?;

    match action {
        RevisionAction::Revert(index) => {
            let viewer = auth.viewer();
            state
                .history
                .access
                .check(viewer.as_ref(), Capability::RevertRevision)?;

            let revisions = ensure_revisions(&state.pool, post_id).await?;
            let target = select_revert_target(post_id, &revisions, index)?;
            let editor_id = viewer.as_ref().map(|v| v.user_id);

            PostRepo::set_content(&state.pool, post_id, &target.title, &target.content, editor_id)
                .await?;

            tracing::info!(
                ?editor_id,
                post_id,
                reverted_to = index,
                "Post reverted to earlier revision"
            );

            Ok(Redirect::to(&history_url(post_id)).into_response())
        }
        RevisionAction::Delete(index) => {
            delete_revision(post_id, index)?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}
