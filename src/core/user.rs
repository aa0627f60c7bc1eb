use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a user by the server
///
/// Roles determine which routes and actions are permitted. The server is the
/// authority; the client mirrors the rules only to decide what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Manager,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Manager => write!(f, "manager"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A user account as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// A user field that may arrive as a full object or a bare id
///
/// List endpoints return bare ids for `created_by`/`assigned_to`; detail
/// endpoints expand them into full user objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Full(User),
    Id(i64),
}

impl UserRef {
    /// The user id regardless of representation
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Full(user) => user.id,
            Self::Id(id) => *id,
        }
    }

    /// The username when the full object is available
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Full(user) => Some(&user.username),
            Self::Id(_) => None,
        }
    }

    /// Display label: username when known, `#id` otherwise
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Full(user) => user.username.clone(),
            Self::Id(id) => format!("#{id}"),
        }
    }
}
