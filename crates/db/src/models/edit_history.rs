//! Edit history models.
//!
//! History rows are immutable snapshots created by every edit.

use qa_history_core::revision::Revision;
use qa_history_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::post::Post;

/// A row from the `edit_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EditHistoryEntry {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: Option<DbId>,
    pub updated_at: Timestamp,
    pub title: Option<String>,
    pub content: String,
    pub tags: Option<String>,
}

impl EditHistoryEntry {
    /// Convert to a revision, taking the post kind and parent from `live`.
    pub fn into_revision(self, live: &Post) -> Revision {
        Revision {
            post_id: self.post_id,
            user_id: self.user_id,
            updated_at: self.updated_at,
            title: self.title.unwrap_or_default(),
            content: self.content,
            tags: self.tags,
            post_type: live.kind(),
            parent_id: live.parent_id,
        }
    }
}

/// A post that has been edited at least once, for the recent edits listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentEdit {
    pub post_id: DbId,
    pub post_type: String,
    pub parent_id: Option<DbId>,
    pub title: Option<String>,
    pub last_edited_at: Timestamp,
    pub edit_count: i64,
}
