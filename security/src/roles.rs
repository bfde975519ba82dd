// security/src/roles.rs

use models::{SessionProfile, ADMIN_ROLE};
use serde::Serialize;

/// Actions guarded by the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageListings,
    ManageMessages,
}

impl Permission {
    pub const ALL: [Permission; 3] = [
        Permission::ViewDashboard,
        Permission::ManageListings,
        Permission::ManageMessages,
    ];
}

/// The role recorded on a profile. Only the exact value `admin` is
/// privileged; any other text, or none at all, is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Other(String),
    Unassigned,
}

impl Role {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(ADMIN_ROLE) => Role::Admin,
            Some(other) if !other.trim().is_empty() => Role::Other(other.to_string()),
            _ => Role::Unassigned,
        }
    }

    pub fn of(profile: &SessionProfile) -> Self {
        Self::parse(profile.role.as_deref())
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => &Permission::ALL,
            Role::Other(_) | Role::Unassigned => &[],
        }
    }
}
