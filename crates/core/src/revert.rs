//! Mutations requested from the revision list: revert and delete.
//!
//! A revert is applied by the repository layer through the ordinary edit
//! path, so the pre-revert state is itself recorded as a revision. This
//! module only decides *what* to apply. Deleting a revision is not supported.

use crate::error::CoreError;
use crate::revision::Revision;
use crate::types::{DbId, RevisionIndex};

/// A mutation submitted from the revision list form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionAction {
    Revert(RevisionIndex),
    Delete(RevisionIndex),
}

impl RevisionAction {
    /// Interpret the `revert` / `delete` form fields.
    ///
    /// `revert` wins when both are present. Returns `Ok(None)` when neither
    /// field was submitted.
    pub fn from_form(
        revert: Option<&str>,
        delete: Option<&str>,
    ) -> Result<Option<Self>, CoreError> {
        if let Some(value) = revert {
            return parse_index("revert", value).map(|i| Some(Self::Revert(i)));
        }
        if let Some(value) = delete {
            return parse_index("delete", value).map(|i| Some(Self::Delete(i)));
        }
        Ok(None)
    }
}

fn parse_index(field: &str, value: &str) -> Result<RevisionIndex, CoreError> {
    value.trim().parse().map_err(|_| {
        CoreError::Validation(format!(
            "'{field}' must be a revision number, got '{value}'"
        ))
    })
}

/// Pick the revision a revert to `index` should restore.
///
/// `revisions` is the full oldest-first sequence including the live row.
/// Any index in range is accepted; choosing the live row applies its own
/// content again, which records one more snapshot and leaves the post as is.
pub fn select_revert_target(
    post_id: DbId,
    revisions: &[Revision],
    index: RevisionIndex,
) -> Result<&Revision, CoreError> {
    revisions
        .get(index)
        .ok_or(CoreError::InvalidRevision { post_id, index })
}

/// Delete one historical revision.
///
/// Removing a middle revision would silently change what its neighbours are
/// diffed against, so this always refuses without touching storage.
pub fn delete_revision(post_id: DbId, index: RevisionIndex) -> Result<(), CoreError> {
    tracing::info!(post_id, revision = index, "Rejected revision delete request");
    Err(CoreError::Unsupported(
        "Deleting revisions is not supported".into(),
    ))
}
