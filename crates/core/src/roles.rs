//! Role names and the permission capability derived from them.
//!
//! A session resolves its role into [`Permissions`] exactly once and hands
//! the resulting value to whatever needs to gate an action. The capability
//! is `Copy` and never changes for the lifetime of the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER];

/// Dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Editor => ROLE_EDITOR,
            Role::Viewer => ROLE_VIEWER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_EDITOR => Ok(Role::Editor),
            ROLE_VIEWER => Ok(Role::Viewer),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

/// What a session is allowed to do with dashboard resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Permissions {
    /// Admins may do everything, editors may create and edit, viewers are
    /// read-only.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                can_create: true,
                can_edit: true,
                can_delete: true,
            },
            Role::Editor => Self {
                can_create: true,
                can_edit: true,
                can_delete: false,
            },
            Role::Viewer => Self::read_only(),
        }
    }

    /// Capability of an anonymous visitor of the public site.
    pub fn read_only() -> Self {
        Self::default()
    }

    pub fn require_create(&self) -> Result<(), CoreError> {
        check(self.can_create, "create")
    }

    pub fn require_edit(&self) -> Result<(), CoreError> {
        check(self.can_edit, "edit")
    }

    pub fn require_delete(&self) -> Result<(), CoreError> {
        check(self.can_delete, "delete")
    }
}

fn check(allowed: bool, action: &str) -> Result<(), CoreError> {
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Your role is not allowed to {action} this item"
        )))
    }
}
