// models/src/medical/hospital.rs

use serde::{Deserialize, Serialize};

use crate::{
    identifiers::RecordId,
    listing::{Contact, Listing, ListingKind, Location},
};

use super::null_as_empty;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub emergency_services: bool,
    #[serde(default)]
    pub bed_count: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing for Hospital {
    const KIND: ListingKind = ListingKind::Hospital;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.location.city.as_str(), self.location.state.as_str()];
        fields.extend(self.specialties.iter().map(String::as_str));
        fields
    }
}
