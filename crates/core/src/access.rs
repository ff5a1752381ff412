//! Access policy for the revision history feature.
//!
//! Every handler checks its capability here before loading any revision data.
//! An anonymous viewer who lacks a capability is told to log in; a logged-in
//! viewer who lacks it is refused outright.

use crate::error::CoreError;
use crate::roles::PermitLevel;
use crate::types::DbId;

/// Operations guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// View the revision list of a post, or the recent edits listing.
    ViewHistory,
    /// Revert a post to an earlier revision.
    RevertRevision,
}

impl Capability {
    /// What the capability allows, phrased for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ViewHistory => "view the edit history",
            Self::RevertRevision => "revert revisions",
        }
    }
}

/// Identity of the requester, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: DbId,
    pub role: String,
}

/// Minimum permit levels for each capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub view: PermitLevel,
    pub revert: PermitLevel,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            view: PermitLevel::Users,
            revert: PermitLevel::Editors,
        }
    }
}

impl AccessPolicy {
    pub fn required_level(&self, capability: Capability) -> PermitLevel {
        match capability {
            Capability::ViewHistory => self.view,
            Capability::RevertRevision => self.revert,
        }
    }

    /// Check whether `viewer` may use `capability`.
    ///
    /// Returns [`CoreError::Unauthorized`] when the viewer is anonymous and a
    /// login would be required, and [`CoreError::Forbidden`] when a logged-in
    /// viewer's level is too low.
    pub fn check(&self, viewer: Option<&Viewer>, capability: Capability) -> Result<(), CoreError> {
        let required = self.required_level(capability);
        if required == PermitLevel::Everyone {
            return Ok(());
        }

        let Some(viewer) = viewer else {
            return Err(CoreError::Unauthorized(
                "Please log in to access the edit history".into(),
            ));
        };

        if PermitLevel::for_role(&viewer.role) < required {
            return Err(CoreError::Forbidden(format!(
                "You do not have permission to {}",
                capability.describe()
            )));
        }
        Ok(())
    }
}
