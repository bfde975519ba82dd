// models/src/listing.rs

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::GatewayError, identifiers::RecordId};

/// Named tables of the hosted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Doctors,
    Hospitals,
    MedicalShops,
    PathologyLabs,
    Categories,
    Profiles,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Doctors,
        Collection::Hospitals,
        Collection::MedicalShops,
        Collection::PathologyLabs,
        Collection::Categories,
        Collection::Profiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Doctors => "doctors",
            Collection::Hospitals => "hospitals",
            Collection::MedicalShops => "medical_shops",
            Collection::PathologyLabs => "pathology_labs",
            Collection::Categories => "categories",
            Collection::Profiles => "profiles",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four kinds of provider listed in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingKind {
    Doctor,
    Hospital,
    PathologyLab,
    MedicalShop,
}

impl ListingKind {
    pub const ALL: [ListingKind; 4] = [
        ListingKind::Doctor,
        ListingKind::Hospital,
        ListingKind::PathologyLab,
        ListingKind::MedicalShop,
    ];

    pub fn collection(&self) -> Collection {
        match self {
            ListingKind::Doctor => Collection::Doctors,
            ListingKind::Hospital => Collection::Hospitals,
            ListingKind::PathologyLab => Collection::PathologyLabs,
            ListingKind::MedicalShop => Collection::MedicalShops,
        }
    }

    /// Path segment used by the HTTP surface.
    pub fn slug(&self) -> &'static str {
        match self {
            ListingKind::Doctor => "doctors",
            ListingKind::Hospital => "hospitals",
            ListingKind::PathologyLab => "labs",
            ListingKind::MedicalShop => "medical-shops",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListingKind::Doctor => "Doctor",
            ListingKind::Hospital => "Hospital",
            ListingKind::PathologyLab => "Pathology lab",
            ListingKind::MedicalShop => "Medical shop",
        }
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "doctors" | "doctor" => Ok(ListingKind::Doctor),
            "hospitals" | "hospital" => Ok(ListingKind::Hospital),
            "labs" | "pathology-labs" | "pathology_labs" => Ok(ListingKind::PathologyLab),
            "medical-shops" | "medical_shops" | "shops" => Ok(ListingKind::MedicalShop),
            other => Err(format!("Unknown listing kind: {other}")),
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "crate::medical::null_as_blank")]
    pub address: String,
    #[serde(default, deserialize_with = "crate::medical::null_as_blank")]
    pub city: String,
    #[serde(default, deserialize_with = "crate::medical::null_as_blank")]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "crate::medical::null_as_blank")]
    pub phone: String,
    #[serde(default, deserialize_with = "crate::medical::null_as_blank")]
    pub email: String,
}

/// A provider row as held by the directory. Implemented by the four listing
/// variants; everything generic (stores, filters, commands) goes through it.
pub trait Listing:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ListingKind;

    fn id(&self) -> Option<&RecordId>;

    fn name(&self) -> &str;

    fn location(&self) -> &Location;

    fn rating(&self) -> Option<f64>;

    /// Free-text fields matched by search in addition to the name.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Names of fields derived locally that must never be written back.
    fn local_fields() -> &'static [&'static str] {
        &[]
    }

    /// The row written to the gateway on insert or update: the record without
    /// its identifier and without locally derived fields.
    fn to_row(&self) -> Result<Value, GatewayError> {
        let mut row = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut row {
            map.remove("id");
            for field in Self::local_fields() {
                map.remove(*field);
            }
        }
        Ok(row)
    }

    /// Decodes a row returned by the gateway.
    fn from_row(row: Value) -> Result<Self, GatewayError> {
        serde_json::from_value(row).map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_slugs_round_trip_through_from_str() {
        for kind in ListingKind::ALL {
            assert_eq!(kind.slug().parse::<ListingKind>().unwrap(), kind);
        }
        assert!("clinics".parse::<ListingKind>().is_err());
    }

    #[test]
    fn kinds_map_to_backend_tables() {
        assert_eq!(ListingKind::PathologyLab.collection().as_str(), "pathology_labs");
        assert_eq!(ListingKind::MedicalShop.collection().as_str(), "medical_shops");
    }
}
