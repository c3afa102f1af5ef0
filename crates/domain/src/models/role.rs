//! Caller roles.

use serde::{Deserialize, Serialize};

/// Role carried by the caller's access token.
///
/// `User` may only ever see their own work entries; `Editor` and `Admin`
/// may query any agent. Role comparisons live in the access guard; the
/// filter and aggregation code never branches on roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Editor,
    Admin,
}

impl Role {
    /// Parses a role claim as it appears in a JWT.
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "USER" => Some(Self::User),
            "EDITOR" => Some(Self::Editor),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Whether this role may query agents other than itself.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Editor | Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Editor => write!(f, "EDITOR"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}
