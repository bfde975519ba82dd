// directory/src/resolve.rs

use std::collections::{BTreeSet, HashMap};

use models::{CategoryRef, Collection, Doctor, GatewayResult};
use storage_gateway::{Gateway, SelectQuery};
use tracing::debug;

/// Fills `category_name` for every doctor with ONE lookup of all referenced
/// categories followed by a local id → name mapping. Returns the number of
/// doctors that received a name. No lookup is made when nothing references a
/// category.
pub async fn resolve_categories(doctors: &mut [Doctor], gateway: &dyn Gateway) -> GatewayResult<usize> {
    let referenced: BTreeSet<String> = doctors
        .iter()
        .filter_map(|d| d.category_id.as_ref().map(|id| id.to_string()))
        .collect();
    if referenced.is_empty() {
        return Ok(0);
    }

    let query = SelectQuery::all().any_of("id", referenced);
    let rows = gateway.select(Collection::Categories, &query).await?;
    let names: HashMap<String, String> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value::<CategoryRef>(row).ok())
        .map(|category| (category.id.to_string(), category.name))
        .collect();

    let mut resolved = 0;
    for doctor in doctors.iter_mut() {
        doctor.category_name = doctor
            .category_id
            .as_ref()
            .and_then(|id| names.get(id.as_str()).cloned());
        if doctor.category_name.is_some() {
            resolved += 1;
        }
    }
    debug!(resolved, categories = names.len(), "resolved doctor categories");
    Ok(resolved)
}

/// All categories, ordered by name.
pub async fn load_categories(gateway: &dyn Gateway) -> GatewayResult<Vec<CategoryRef>> {
    let rows = gateway
        .select(Collection::Categories, &SelectQuery::all().order_by("name", true))
        .await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::RecordId;
    use serde_json::json;
    use storage_gateway::{Filter, MockGateway};

    fn doctor(name: &str, category: Option<&str>) -> Doctor {
        Doctor {
            name: name.to_string(),
            category_id: category.map(|c| RecordId::new(c).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn resolves_all_doctors_with_a_single_lookup() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_select()
            .withf(|collection, query| {
                *collection == Collection::Categories
                    && query.filters
                        == vec![Filter::In {
                            column: "id".to_string(),
                            values: vec!["c1".to_string(), "c2".to_string()],
                        }]
            })
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    json!({ "id": "c1", "name": "General Physician" }),
                    json!({ "id": "c2", "name": "Specialist" }),
                ])
            });

        let mut doctors = vec![
            doctor("A", Some("c1")),
            doctor("B", Some("c2")),
            doctor("C", Some("c1")),
            doctor("D", None),
            doctor("E", Some("c3")),
        ];
        let resolved = resolve_categories(&mut doctors, &gateway).await.unwrap();

        assert_eq!(resolved, 3);
        assert_eq!(doctors[0].category_name.as_deref(), Some("General Physician"));
        assert_eq!(doctors[1].category_name.as_deref(), Some("Specialist"));
        assert_eq!(doctors[2].category_name.as_deref(), Some("General Physician"));
        assert_eq!(doctors[3].category_name, None);
        assert_eq!(doctors[4].category_name, None);
    }

    #[tokio::test]
    async fn no_lookup_without_references() {
        let mut gateway = MockGateway::new();
        gateway.expect_select().times(0);
        let mut doctors = vec![doctor("A", None)];
        assert_eq!(resolve_categories(&mut doctors, &gateway).await.unwrap(), 0);
    }
}
