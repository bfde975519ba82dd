// models/src/medical/profile.rs

use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;

/// The only role value that opens the admin back-office.
pub const ADMIN_ROLE: &str = "admin";

/// Row of `profiles`, keyed by the authentication subject. The `role` column
/// is authoritative for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub id: RecordId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl SessionProfile {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}
