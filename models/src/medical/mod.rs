// models/src/medical/mod.rs

use serde::{Deserialize, Deserializer};

pub mod category;
pub mod contact_message;
pub mod doctor;
pub mod hospital;
pub mod medical_shop;
pub mod pathology_lab;
pub mod profile;

pub use category::CategoryRef;
pub use contact_message::{ContactMessage, MessageStatus};
pub use doctor::Doctor;
pub use hospital::Hospital;
pub use medical_shop::MedicalShop;
pub use pathology_lab::PathologyLab;
pub use profile::{SessionProfile, ADMIN_ROLE};

/// Array columns come back as `null` when never set.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text columns come back as `null` when never set.
pub(crate) fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
