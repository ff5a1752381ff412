//! Repository for post revisions: `edit_history` rows plus the live `posts` row.
//!
//! History rows are never updated. Deleting individual rows is deliberately
//! not offered; see `qa_history_core::revert::delete_revision`.

use qa_history_core::revision::Revision;
use qa_history_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::edit_history::{EditHistoryEntry, RecentEdit};
use crate::models::post::Post;
use crate::repositories::post_repo::PostRepo;

/// Column list for edit_history queries.
const COLUMNS: &str = "id, post_id, user_id, updated_at, title, content, tags";

/// Provides read access to the revision sequence of a post.
pub struct RevisionRepo;

impl RevisionRepo {
    /// List the historical rows of a post, oldest first.
    pub async fn fetch_historical(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<EditHistoryEntry>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::fetch_historical_inner(&mut *conn, post_id).await
    }

    async fn fetch_historical_inner(
        conn: &mut PgConnection,
        post_id: DbId,
    ) -> Result<Vec<EditHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM edit_history
             WHERE post_id = $1
             ORDER BY updated_at ASC, id ASC"
        );
        sqlx::query_as::<_, EditHistoryEntry>(&query)
            .bind(post_id)
            .fetch_all(conn)
            .await
    }

    /// Fetch the live row of a post.
    pub async fn fetch_live(pool: &PgPool, post_id: DbId) -> Result<Option<Post>, sqlx::Error> {
        PostRepo::find_by_id(pool, post_id).await
    }

    /// Load every revision of a post, oldest first, live row last.
    ///
    /// Both reads share one REPEATABLE READ transaction so an edit landing
    /// between them cannot drop or duplicate a revision. Returns `None` when
    /// the post does not exist, and the live row alone when it was never
    /// edited.
    pub async fn fetch_revisions(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Option<(Post, Vec<Revision>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let Some(live) = PostRepo::find_by_id_inner(&mut *tx, post_id).await? else {
            tx.commit().await?;
            return Ok(None);
        };
        let history = Self::fetch_historical_inner(&mut *tx, post_id).await?;
        tx.commit().await?;

        let mut revisions: Vec<Revision> = history
            .into_iter()
            .map(|entry| entry.into_revision(&live))
            .collect();
        revisions.push(live.to_revision());

        Ok(Some((live, revisions)))
    }

    /// Count the historical rows of a post.
    pub async fn count_for_post(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM edit_history WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Posts ordered by their most recent edit, newest first.
    pub async fn list_recent_edits(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecentEdit>, sqlx::Error> {
        sqlx::query_as::<_, RecentEdit>(
            "SELECT p.id AS post_id, p.post_type, p.parent_id, p.title,
                    h.last_edited_at, h.edit_count
             FROM (
                 SELECT post_id, MAX(updated_at) AS last_edited_at, COUNT(*) AS edit_count
                 FROM edit_history
                 GROUP BY post_id
             ) h
             JOIN posts p ON p.id = h.post_id
             ORDER BY h.last_edited_at DESC, p.id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
