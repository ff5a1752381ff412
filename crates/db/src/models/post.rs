//! Live post model.

use qa_history_core::revision::{PostType, Revision};
use qa_history_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub post_type: String,
    pub parent_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub last_user_id: Option<DbId>,
    pub title: Option<String>,
    pub content: String,
    pub tags: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Post {
    pub fn kind(&self) -> PostType {
        PostType::from_code(&self.post_type)
    }

    /// The live row as the last revision of the sequence.
    ///
    /// It is attributed to the original author at creation time: the moment
    /// the post's first content appeared.
    pub fn to_revision(&self) -> Revision {
        Revision {
            post_id: self.id,
            user_id: self.user_id,
            updated_at: self.created_at,
            title: self.title.clone().unwrap_or_default(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            post_type: self.kind(),
            parent_id: self.parent_id,
        }
    }
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub post_type: PostType,
    pub parent_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub title: Option<String>,
    pub content: String,
    pub tags: Option<String>,
}
