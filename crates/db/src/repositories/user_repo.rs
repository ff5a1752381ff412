//! Repository for the `users` table.

use std::collections::HashMap;

use qa_history_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list for users queries.
const COLUMNS: &str = "id, handle, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user.
    pub async fn create(pool: &PgPool, handle: &str) -> Result<User, sqlx::Error> {
        let query = format!("INSERT INTO users (handle) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(handle)
            .fetch_one(pool)
            .await
    }

    /// Resolve user ids to handles in one query.
    ///
    /// Ids with no matching user are absent from the result.
    pub async fn handles_for_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, String>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(DbId, String)> =
            sqlx::query_as("SELECT id, handle FROM users WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
