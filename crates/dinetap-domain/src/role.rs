//! Account role types.

use serde::{Deserialize, Serialize};

/// Account permission level.
///
/// Wire format: lowercase string (`user`, `manager`, `admin`, `superadmin`),
/// used both in JSON bodies and in the `role` path segment of account routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Manager,
    Admin,
    Superadmin,
}

impl Role {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str(v: &str) -> Option<Self> {
        match v {
            "user" => Some(Self::User),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            "superadmin" => Some(Self::Superadmin),
            _ => None,
        }
    }

    /// Wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Whether tokens can be minted for this role. Each such role has its own
    /// signing secret; `user` accounts never receive a bearer token.
    pub fn is_token_bearing(self) -> bool {
        !matches!(self, Self::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
