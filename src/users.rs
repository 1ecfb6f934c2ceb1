//! Staff accounts and access levels.

use serde::{Deserialize, Serialize};

/// What a user may do in the tracker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Marks their own role's tasks complete.
    #[default]
    Staff,
    /// Reviews completion across roles.
    Manager,
    /// Manages users, roles and task definitions.
    Admin,
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role whose checklist this user works.
    pub role: String,
    /// Access level.
    #[serde(default)]
    pub access: Access,
    /// Uploaded profile photo reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Inactive users are kept for history but hidden from summaries.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Create an active staff user.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            access: Access::Staff,
            photo: None,
            active: true,
        }
    }

    /// Set the access level.
    #[must_use]
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Managers and admins can review every role's report.
    #[must_use]
    pub fn can_review(&self) -> bool {
        self.access >= Access::Manager
    }

    /// Only admins edit users, roles and task definitions.
    #[must_use]
    pub fn can_administer(&self) -> bool {
        self.access == Access::Admin
    }
}

/// Distinct roles across `users`, sorted.
#[must_use]
pub fn roles(users: &[User]) -> Vec<String> {
    let mut roles: Vec<String> = users.iter().map(|u| u.role.clone()).collect();
    roles.sort();
    roles.dedup();
    roles
}
