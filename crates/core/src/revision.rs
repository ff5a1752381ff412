//! The revision model: one snapshot of a post's title, content and tags.
//!
//! A post with N edits has N+1 revisions: N historical snapshots, each
//! stamped with the moment it was superseded, followed by the live row,
//! which carries the post's creation time and original author.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// The kind of post a revision belongs to.
///
/// Stored as the single-letter codes used by the `posts.type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Question,
    Answer,
    Comment,
    /// Hidden, queued or otherwise non-public posts.
    Other,
}

impl PostType {
    /// Column value for `posts.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "Q",
            Self::Answer => "A",
            Self::Comment => "C",
            Self::Other => "X",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "Q" => Self::Question,
            "A" => Self::Answer,
            "C" => Self::Comment,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single historical or live snapshot of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub post_id: DbId,
    /// Author of this snapshot's content. `None` for anonymous posts.
    pub user_id: Option<DbId>,
    /// When this snapshot was superseded; creation time for the live row.
    pub updated_at: Timestamp,
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
    pub post_type: PostType,
    /// Owning question, for answers and comments.
    pub parent_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_type_codes_roundtrip() {
        for ty in [PostType::Question, PostType::Answer, PostType::Comment] {
            assert_eq!(PostType::from_code(ty.as_str()), ty);
        }
    }

    #[test]
    fn hidden_types_map_to_other() {
        assert_eq!(PostType::from_code("Q_HIDDEN"), PostType::Other);
        assert_eq!(PostType::from_code("A_QUEUED"), PostType::Other);
    }
}
