use crate::types::{DbId, RevisionIndex};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Revision {index} not found for post {post_id}")]
    InvalidRevision {
        post_id: DbId,
        index: RevisionIndex,
    },

    #[error("Post {post_id} has no revision history")]
    NoHistory { post_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The viewer is anonymous and the capability requires a login.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not implemented: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_revision() {
        let err = CoreError::InvalidRevision {
            post_id: 12,
            index: 7,
        };
        assert_eq!(err.to_string(), "Revision 7 not found for post 12");
    }

    #[test]
    fn display_no_history() {
        let err = CoreError::NoHistory { post_id: 3 };
        assert_eq!(err.to_string(), "Post 3 has no revision history");
    }

    #[test]
    fn display_unsupported() {
        let err = CoreError::Unsupported("Deleting revisions".into());
        assert_eq!(err.to_string(), "Not implemented: Deleting revisions");
    }
}
