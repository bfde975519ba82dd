// models/src/lib.rs

//! Shapes of everything the directory stores in the hosted backend: the four
//! listing variants, doctor categories, the role-bearing session profile and
//! the admin contact messages, plus the error taxonomy shared by the other
//! crates of the workspace.

pub mod errors;
pub mod identifiers;
pub mod listing;
pub mod medical;

pub use errors::{DirectoryError, DirectoryResult, FieldErrors, GatewayError, GatewayResult};
pub use identifiers::RecordId;
pub use listing::{Collection, Contact, Listing, ListingKind, Location};
pub use medical::{
    CategoryRef, ContactMessage, Doctor, Hospital, MedicalShop, MessageStatus, PathologyLab,
    SessionProfile, ADMIN_ROLE,
};
