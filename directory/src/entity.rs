// directory/src/entity.rs

use async_trait::async_trait;
use models::{
    Doctor, FieldErrors, GatewayResult, Hospital, Listing, MedicalShop, PathologyLab,
};
use storage_gateway::Gateway;

use crate::fallback;
use crate::filter::{contains_ignore_case, Facet};
use crate::resolve::resolve_categories;

/// Per-variant hooks of the generic store and filter: facet vocabulary,
/// fallback samples and post-load enrichment.
#[async_trait]
pub trait DirectoryEntity: Listing {
    /// Facet keys understood by [`DirectoryEntity::facet`].
    const FACETS: &'static [&'static str];

    /// Builds the facet named `key` from its query-string value. Unknown keys
    /// and unparseable values are reported against the key.
    fn facet(key: &str, value: &str) -> Result<Facet<Self>, FieldErrors>;

    fn fallback() -> Vec<Self>;

    /// Batched lookups of related rows after a load.
    async fn enrich(records: &mut [Self], gateway: &dyn Gateway) -> GatewayResult<()>;
}

fn unknown_facet<T: DirectoryEntity>(key: &str) -> FieldErrors {
    FieldErrors::single(
        key,
        format!("Unknown filter; expected one of: {}", T::FACETS.join(", ")),
    )
}

fn parse_bool(key: &str, value: &str) -> Result<bool, FieldErrors> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(FieldErrors::single(key, "Expected true or false")),
    }
}

fn min_rating<T: Listing>(key: &str, value: &str) -> Result<Facet<T>, FieldErrors> {
    let min: f64 = value
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| (0.0..=5.0).contains(v))
        .ok_or_else(|| FieldErrors::single(key, "Expected a rating between 0 and 5"))?;
    Ok(Facet::new(key, move |r: &T| r.rating().is_some_and(|rating| rating >= min)))
}

fn city<T: Listing>(key: &str, value: &str) -> Facet<T> {
    let wanted = value.to_string();
    Facet::new(key, move |r: &T| contains_ignore_case(&r.location().city, &wanted))
}

fn state<T: Listing>(key: &str, value: &str) -> Facet<T> {
    let wanted = value.to_string();
    Facet::new(key, move |r: &T| contains_ignore_case(&r.location().state, &wanted))
}

fn any_contains(items: &[String], wanted: &str) -> bool {
    items.iter().any(|item| contains_ignore_case(item, wanted))
}

#[async_trait]
impl DirectoryEntity for Doctor {
    const FACETS: &'static [&'static str] = &["specialty", "city", "state", "category", "min_rating"];

    fn facet(key: &str, value: &str) -> Result<Facet<Self>, FieldErrors> {
        let wanted = value.to_string();
        match key {
            "specialty" => Ok(Facet::new(key, move |d: &Doctor| contains_ignore_case(&d.specialty, &wanted))),
            "category" => Ok(Facet::new(key, move |d: &Doctor| {
                d.category_id.as_ref().is_some_and(|id| id.as_str() == wanted)
            })),
            "city" => Ok(city(key, value)),
            "state" => Ok(state(key, value)),
            "min_rating" => min_rating(key, value),
            _ => Err(unknown_facet::<Self>(key)),
        }
    }

    fn fallback() -> Vec<Self> {
        fallback::doctors()
    }

    async fn enrich(records: &mut [Self], gateway: &dyn Gateway) -> GatewayResult<()> {
        resolve_categories(records, gateway).await.map(|_| ())
    }
}

#[async_trait]
impl DirectoryEntity for Hospital {
    const FACETS: &'static [&'static str] =
        &["specialty", "facility", "emergency", "city", "state", "min_rating"];

    fn facet(key: &str, value: &str) -> Result<Facet<Self>, FieldErrors> {
        let wanted = value.to_string();
        match key {
            "specialty" => Ok(Facet::new(key, move |h: &Hospital| any_contains(&h.specialties, &wanted))),
            "facility" => Ok(Facet::new(key, move |h: &Hospital| any_contains(&h.facilities, &wanted))),
            "emergency" => {
                let flag = parse_bool(key, value)?;
                Ok(Facet::new(key, move |h: &Hospital| h.emergency_services == flag))
            }
            "city" => Ok(city(key, value)),
            "state" => Ok(state(key, value)),
            "min_rating" => min_rating(key, value),
            _ => Err(unknown_facet::<Self>(key)),
        }
    }

    fn fallback() -> Vec<Self> {
        fallback::hospitals()
    }

    async fn enrich(_records: &mut [Self], _gateway: &dyn Gateway) -> GatewayResult<()> {
        Ok(())
    }
}

#[async_trait]
impl DirectoryEntity for PathologyLab {
    const FACETS: &'static [&'static str] = &["test", "city", "state", "min_rating"];

    fn facet(key: &str, value: &str) -> Result<Facet<Self>, FieldErrors> {
        let wanted = value.to_string();
        match key {
            "test" => Ok(Facet::new(key, move |l: &PathologyLab| any_contains(&l.tests_offered, &wanted))),
            "city" => Ok(city(key, value)),
            "state" => Ok(state(key, value)),
            "min_rating" => min_rating(key, value),
            _ => Err(unknown_facet::<Self>(key)),
        }
    }

    fn fallback() -> Vec<Self> {
        fallback::pathology_labs()
    }

    async fn enrich(_records: &mut [Self], _gateway: &dyn Gateway) -> GatewayResult<()> {
        Ok(())
    }
}

#[async_trait]
impl DirectoryEntity for MedicalShop {
    const FACETS: &'static [&'static str] = &["service", "city", "state", "min_rating"];

    fn facet(key: &str, value: &str) -> Result<Facet<Self>, FieldErrors> {
        let wanted = value.to_string();
        match key {
            "service" => Ok(Facet::new(key, move |s: &MedicalShop| any_contains(&s.services, &wanted))),
            "city" => Ok(city(key, value)),
            "state" => Ok(state(key, value)),
            "min_rating" => min_rating(key, value),
            _ => Err(unknown_facet::<Self>(key)),
        }
    }

    fn fallback() -> Vec<Self> {
        fallback::medical_shops()
    }

    async fn enrich(_records: &mut [Self], _gateway: &dyn Gateway) -> GatewayResult<()> {
        Ok(())
    }
}

/// Builds facets from query-string pairs, collecting every bad key.
pub fn facets_from_pairs<T: DirectoryEntity>(
    pairs: impl IntoIterator<Item = (String, String)>,
) -> Result<Vec<Facet<T>>, FieldErrors> {
    let mut facets = Vec::new();
    let mut errors = FieldErrors::new();
    for (key, value) in pairs {
        if value.trim().is_empty() {
            continue;
        }
        match T::facet(&key, &value) {
            Ok(facet) => facets.push(facet),
            Err(bad) => {
                for field in bad.fields() {
                    errors.add(field, bad.get(field).unwrap_or_default());
                }
            }
        }
    }
    errors.into_result(facets)
}
