//! Well-known role names and the ordered permit levels they map to.
//!
//! Role names arrive in the `role` claim of the bearer token issued by the
//! host site. Permission settings are expressed as a minimum [`PermitLevel`].

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_EXPERT: &str = "expert";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER: &str = "super";

/// Minimum privilege tier required for a capability, lowest first.
///
/// `Everyone` includes anonymous visitors; every other level needs a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitLevel {
    Everyone,
    Users,
    Experts,
    Editors,
    Moderators,
    Admins,
    Super,
}

impl PermitLevel {
    /// String representation used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::Users => "users",
            Self::Experts => "experts",
            Self::Editors => "editors",
            Self::Moderators => "moderators",
            Self::Admins => "admins",
            Self::Super => "super",
        }
    }

    /// Parse a configuration value such as `"editors"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "everyone" => Some(Self::Everyone),
            "users" => Some(Self::Users),
            "experts" => Some(Self::Experts),
            "editors" => Some(Self::Editors),
            "moderators" => Some(Self::Moderators),
            "admins" => Some(Self::Admins),
            "super" => Some(Self::Super),
            _ => None,
        }
    }

    /// The level a logged-in user with `role` holds.
    ///
    /// Unknown role names fall back to [`PermitLevel::Users`]: the holder is
    /// authenticated but has no elevated privileges.
    pub fn for_role(role: &str) -> Self {
        match role {
            ROLE_EXPERT => Self::Experts,
            ROLE_EDITOR => Self::Editors,
            ROLE_MODERATOR => Self::Moderators,
            ROLE_ADMIN => Self::Admins,
            ROLE_SUPER => Self::Super,
            _ => Self::Users,
        }
    }
}

impl std::fmt::Display for PermitLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(PermitLevel::Everyone < PermitLevel::Users);
        assert!(PermitLevel::Editors < PermitLevel::Moderators);
        assert!(PermitLevel::Admins < PermitLevel::Super);
    }

    #[test]
    fn parse_accepts_known_names() {
        assert_eq!(PermitLevel::parse("editors"), Some(PermitLevel::Editors));
        assert_eq!(PermitLevel::parse(" Users "), Some(PermitLevel::Users));
        assert_eq!(PermitLevel::parse("nobody"), None);
    }

    #[test]
    fn unknown_role_maps_to_users() {
        assert_eq!(PermitLevel::for_role(ROLE_USER), PermitLevel::Users);
        assert_eq!(PermitLevel::for_role("guest"), PermitLevel::Users);
        assert_eq!(PermitLevel::for_role(ROLE_ADMIN), PermitLevel::Admins);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", PermitLevel::Moderators), "moderators");
    }
}
