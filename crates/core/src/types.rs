//! Primitive aliases shared by every crate in the workspace.

/// Post and user ids are PostgreSQL BIGSERIAL columns.
pub type DbId = i64;

/// Revision timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Position of a revision in the oldest-first sequence (0 = original post).
pub type RevisionIndex = usize;
