// models/src/medical/pathology_lab.rs

use serde::{Deserialize, Serialize};

use crate::{
    identifiers::RecordId,
    listing::{Contact, Listing, ListingKind, Location},
};

use super::null_as_empty;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathologyLab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tests_offered: Vec<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing for PathologyLab {
    const KIND: ListingKind = ListingKind::PathologyLab;

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
        fields.extend(self.tests_offered.iter().map(String::as_str));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_test_list_decodes_as_empty() {
        let lab = PathologyLab::from_row(json!({
            "id": "l1",
            "name": "City Diagnostics",
            "tests_offered": null,
            "city": "Nagpur"
        }))
        .unwrap();
        assert!(lab.tests_offered.is_empty());
        assert_eq!(lab.searchable_fields(), vec!["Nagpur", ""]);
    }
}
