//! Repository for the `posts` table.
//!
//! Owns the edit operation: every content change snapshots the previous
//! state into `edit_history` in the same transaction.

use qa_history_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::post::{CreatePost, Post};

/// Column list for posts queries.
pub(crate) const COLUMNS: &str = "id, post_type, parent_id, user_id, last_user_id, \
    title, content, tags, created_at, updated_at";

/// Provides create, read and edit operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post. It has no edit history until its first edit.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (post_type, parent_id, user_id, last_user_id, title, content, tags)
             VALUES ($1, $2, $3, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.post_type.as_str())
            .bind(input.parent_id)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_by_id_inner(&mut *conn, id).await
    }

    pub(crate) async fn find_by_id_inner(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Replace a post's title and content, recording the previous state.
    ///
    /// The live row is locked for the duration of the transaction, so
    /// concurrent edits of the same post are applied one after another and
    /// each leaves its own history row. An empty `title` is stored as NULL.
    /// Returns `RowNotFound` if the post does not exist.
    pub async fn set_content(
        pool: &PgPool,
        post_id: DbId,
        title: &str,
        content: &str,
        editor_id: Option<DbId>,
    ) -> Result<Post, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Post>(&lock_query)
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        sqlx::query(
            "INSERT INTO edit_history (post_id, user_id, updated_at, title, content, tags)
             VALUES ($1, $2, now(), $3, $4, $5)",
        )
        .bind(current.id)
        .bind(current.last_user_id.or(current.user_id))
        .bind(&current.title)
        .bind(&current.content)
        .bind(&current.tags)
        .execute(&mut *tx)
        .await?;

        let update_query = format!(
            "UPDATE posts SET
                title = NULLIF($1, ''),
                content = $2,
                last_user_id = $3,
                updated_at = now()
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&update_query)
            .bind(title)
            .bind(content)
            .bind(editor_id)
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(post_id, ?editor_id, "Post content replaced");
        Ok(post)
    }
}
