// models/src/medical/doctor.rs

use serde::{Deserialize, Serialize};

use crate::{
    identifiers::RecordId,
    listing::{Contact, Listing, ListingKind, Location},
};

use super::null_as_blank;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub specialty: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub qualifications: String,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub bio: String,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    /// Resolved locally from `categories` after a load; never written back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing for Doctor {
    const KIND: ListingKind = ListingKind::Doctor;

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
        vec![&self.specialty, &self.location.city, &self.location.state]
    }

    fn local_fields() -> &'static [&'static str] {
        &["category_name"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_row_with_nulls() {
        let doctor = Doctor::from_row(json!({
            "id": 7,
            "name": "Asha Rao",
            "specialty": "Cardiology",
            "qualifications": null,
            "bio": null,
            "category_id": "c1",
            "address": "12 MG Road",
            "city": "Pune",
            "state": "MH",
            "phone": "555-0101",
            "email": "asha@example.com",
            "rating": 4.5,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(doctor.id.as_deref(), Some("7"));
        assert_eq!(doctor.qualifications, "");
        assert_eq!(doctor.location.city, "Pune");
        assert_eq!(doctor.contact.email, "asha@example.com");
        assert_eq!(doctor.category_id.as_deref(), Some("c1"));
    }

    #[test]
    fn row_omits_id_and_resolved_category_name() {
        let doctor = Doctor {
            id: Some(RecordId::new("d1").unwrap()),
            name: "Bimal Shah".into(),
            category_name: Some("Specialists".into()),
            ..Default::default()
        };
        let row = doctor.to_row().unwrap();
        assert!(row.get("id").is_none());
        assert!(row.get("category_name").is_none());
        assert_eq!(row["name"], "Bimal Shah");
        assert!(row.get("city").is_some());
    }
}
