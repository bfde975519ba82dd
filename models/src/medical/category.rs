// models/src/medical/category.rs

use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;

/// A doctor category, referenced from `doctors.category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: RecordId,
    pub name: String,
}
