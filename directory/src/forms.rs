// directory/src/forms.rs

//! Admin form submissions. Every field arrives as raw text (numbers are
//! accepted too and kept as their text) and is validated into a typed record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use models::{Contact, Doctor, FieldErrors, Hospital, Location, MedicalShop, PathologyLab, RecordId};

use crate::entity::DirectoryEntity;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
});

/// A submitted form for one listing kind.
pub trait ListingForm: DeserializeOwned + Send + Sync {
    type Record: DirectoryEntity;

    /// The typed record, or a message for every offending field.
    fn validate(&self) -> Result<Self::Record, FieldErrors>;
}

/// `local@domain.tld`, without whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Splits comma-separated text into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    })
}

/// Fields every listing form shares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonFields {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub city: String,
    #[serde(deserialize_with = "text")]
    pub state: String,
    #[serde(deserialize_with = "text")]
    pub phone: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "text")]
    pub rating: String,
    #[serde(deserialize_with = "text")]
    pub image_url: String,
}

struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn new() -> Self {
        Self { errors: FieldErrors::new() }
    }

    fn required(&mut self, field: &str, label: &str, raw: &str) -> String {
        let value = raw.trim();
        if value.is_empty() {
            self.errors.add(field, format!("{label} is required"));
        }
        value.to_string()
    }

    fn optional(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn email(&mut self, raw: &str) -> String {
        let value = self.required("email", "Email", raw);
        if !value.is_empty() && !is_valid_email(&value) {
            self.errors.add("email", "Enter a valid email address");
        }
        value
    }

    fn rating(&mut self, raw: &str) -> Option<f64> {
        let value = self.optional(raw)?;
        match value.parse::<f64>() {
            Ok(rating) if (0.0..=5.0).contains(&rating) => Some(rating),
            _ => {
                self.errors.add("rating", "Rating must be a number between 0 and 5");
                None
            }
        }
    }

    fn count(&mut self, field: &str, label: &str, raw: &str) -> Option<u32> {
        let value = self.optional(raw)?;
        match value.parse::<u32>() {
            Ok(count) => Some(count),
            Err(_) => {
                self.errors.add(field, format!("{label} must be a whole number of zero or more"));
                None
            }
        }
    }

    /// Checkbox text: blank means no.
    fn flag(&mut self, field: &str, label: &str, raw: &str) -> bool {
        match raw.trim().to_lowercase().as_str() {
            "" | "false" | "no" | "off" | "0" => false,
            "true" | "yes" | "on" | "1" => true,
            _ => {
                self.errors.add(field, format!("{label} must be yes or no"));
                false
            }
        }
    }

    fn record_id(&mut self, field: &str, raw: &str) -> Option<RecordId> {
        let value = self.optional(raw)?;
        match RecordId::new(value) {
            Ok(id) => Some(id),
            Err(e) => {
                self.errors.add(field, e.to_string());
                None
            }
        }
    }

    fn common(&mut self, fields: &CommonFields) -> Common {
        Common {
            name: self.required("name", "Name", &fields.name),
            location: Location {
                address: self.required("address", "Address", &fields.address),
                city: self.required("city", "City", &fields.city),
                state: self.required("state", "State", &fields.state),
            },
            contact: Contact {
                phone: self.required("phone", "Phone", &fields.phone),
                email: self.email(&fields.email),
            },
            rating: self.rating(&fields.rating),
            image_url: self.optional(&fields.image_url),
        }
    }

    fn finish<T>(self, record: T) -> Result<T, FieldErrors> {
        self.errors.into_result(record)
    }
}

struct Common {
    name: String,
    location: Location,
    contact: Contact,
    rating: Option<f64>,
    image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorForm {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(deserialize_with = "text")]
    pub specialty: String,
    #[serde(deserialize_with = "text")]
    pub qualifications: String,
    #[serde(deserialize_with = "text")]
    pub experience_years: String,
    #[serde(deserialize_with = "text")]
    pub bio: String,
    #[serde(deserialize_with = "text")]
    pub category_id: String,
}

impl ListingForm for DoctorForm {
    type Record = Doctor;

    fn validate(&self) -> Result<Doctor, FieldErrors> {
        let mut check = Checker::new();
        let common = check.common(&self.common);
        let doctor = Doctor {
            id: None,
            name: common.name,
            specialty: check.required("specialty", "Specialty", &self.specialty),
            qualifications: self.qualifications.trim().to_string(),
            experience_years: check.count("experience_years", "Experience", &self.experience_years),
            bio: self.bio.trim().to_string(),
            category_id: check.record_id("category_id", &self.category_id),
            category_name: None,
            location: common.location,
            contact: common.contact,
            rating: common.rating,
            image_url: common.image_url,
        };
        check.finish(doctor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalForm {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(deserialize_with = "text")]
    pub specialties: String,
    #[serde(deserialize_with = "text")]
    pub facilities: String,
    #[serde(deserialize_with = "text")]
    pub emergency_services: String,
    #[serde(deserialize_with = "text")]
    pub bed_count: String,
}

impl ListingForm for HospitalForm {
    type Record = Hospital;

    fn validate(&self) -> Result<Hospital, FieldErrors> {
        let mut check = Checker::new();
        let common = check.common(&self.common);
        let hospital = Hospital {
            id: None,
            name: common.name,
            location: common.location,
            contact: common.contact,
            specialties: split_list(&self.specialties),
            facilities: split_list(&self.facilities),
            emergency_services: check.flag("emergency_services", "Emergency services", &self.emergency_services),
            bed_count: check.count("bed_count", "Bed count", &self.bed_count),
            rating: common.rating,
            image_url: common.image_url,
        };
        check.finish(hospital)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabForm {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(deserialize_with = "text")]
    pub tests_offered: String,
    #[serde(deserialize_with = "text")]
    pub opening_hours: String,
}

impl ListingForm for LabForm {
    type Record = PathologyLab;

    fn validate(&self) -> Result<PathologyLab, FieldErrors> {
        let mut check = Checker::new();
        let common = check.common(&self.common);
        let lab = PathologyLab {
            id: None,
            name: common.name,
            location: common.location,
            contact: common.contact,
            tests_offered: split_list(&self.tests_offered),
            opening_hours: check.optional(&self.opening_hours),
            rating: common.rating,
            image_url: common.image_url,
        };
        check.finish(lab)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopForm {
    #[serde(flatten)]
    pub common: CommonFields,
    #[serde(deserialize_with = "text")]
    pub services: String,
    #[serde(deserialize_with = "text")]
    pub opening_hours: String,
}

impl ListingForm for ShopForm {
    type Record = MedicalShop;

    fn validate(&self) -> Result<MedicalShop, FieldErrors> {
        let mut check = Checker::new();
        let common = check.common(&self.common);
        let shop = MedicalShop {
            id: None,
            name: common.name,
            location: common.location,
            contact: common.contact,
            services: split_list(&self.services),
            opening_hours: check.optional(&self.opening_hours),
            rating: common.rating,
            image_url: common.image_url,
        };
        check.finish(shop)
    }
}
