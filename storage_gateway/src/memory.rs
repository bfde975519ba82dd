// storage_gateway/src/memory.rs

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;
use models::{Collection, GatewayError, GatewayResult, RecordId};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::query::{cell_text, SelectQuery};
use crate::Gateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

/// In-process tables behaving like the hosted row store: ids are assigned on
/// insert, updates merge patches, unknown ids are `NotFound`. Failures can be
/// injected per operation for tests.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    tables: RwLock<HashMap<Collection, Vec<Value>>>,
    injected: Mutex<HashMap<Operation, VecDeque<GatewayError>>>,
    unavailable: Mutex<Option<GatewayError>>,
    calls: Mutex<HashMap<Operation, usize>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends rows to a table, assigning ids to rows that have none.
    pub async fn seed(&self, collection: Collection, rows: Vec<Value>) {
        let mut tables = self.tables.write().await;
        let table = tables.entry(collection).or_default();
        for mut row in rows {
            ensure_id(&mut row);
            table.push(row);
        }
    }

    pub async fn rows(&self, collection: Collection) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// The next call of `operation` fails with `error`.
    pub fn fail_next(&self, operation: Operation, error: GatewayError) {
        lock(&self.injected)
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Every call fails with `error` until cleared with `None`.
    pub fn set_unavailable(&self, error: Option<GatewayError>) {
        *lock(&self.unavailable) = error;
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        lock(&self.calls).get(&operation).copied().unwrap_or(0)
    }

    pub fn write_count(&self) -> usize {
        [Operation::Insert, Operation::Update, Operation::Delete]
            .into_iter()
            .map(|op| self.call_count(op))
            .sum()
    }

    fn begin(&self, operation: Operation) -> GatewayResult<()> {
        *lock(&self.calls).entry(operation).or_insert(0) += 1;
        if let Some(error) = lock(&self.unavailable).clone() {
            return Err(error);
        }
        if let Some(error) = lock(&self.injected)
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn ensure_id(row: &mut Value) {
    if let Value::Object(map) = row {
        let missing = map.get("id").map_or(true, Value::is_null);
        if missing {
            map.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
    }
}

fn has_id(row: &Value, id: &RecordId) -> bool {
    cell_text(row.get("id")).is_some_and(|cell| cell == id.as_str())
}

#[async_trait]
impl Gateway for InMemoryGateway {
    async fn select(&self, collection: Collection, query: &SelectQuery) -> GatewayResult<Vec<Value>> {
        self.begin(Operation::Select)?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&collection)
            .map(|table| table.iter().filter(|row| query.matches(row)).cloned().collect())
            .unwrap_or_default();
        query.sort(&mut rows);
        debug!("InMemoryGateway: select {} -> {} rows", collection, rows.len());
        Ok(rows)
    }

    async fn insert(&self, collection: Collection, mut row: Value) -> GatewayResult<Value> {
        self.begin(Operation::Insert)?;
        if !row.is_object() {
            return Err(GatewayError::Status {
                status: 400,
                message: format!("insert into {collection} expects an object"),
            });
        }
        ensure_id(&mut row);
        let mut tables = self.tables.write().await;
        let table = tables.entry(collection).or_default();
        if let Some(id) = cell_text(row.get("id")) {
            if table.iter().any(|existing| cell_text(existing.get("id")).as_deref() == Some(id.as_str())) {
                return Err(GatewayError::Status {
                    status: 409,
                    message: format!("duplicate key {id} in {collection}"),
                });
            }
        }
        table.push(row.clone());
        debug!("InMemoryGateway: insert into {}", collection);
        Ok(row)
    }

    async fn update(&self, collection: Collection, id: &RecordId, patch: Value) -> GatewayResult<Value> {
        self.begin(Operation::Update)?;
        let Value::Object(patch) = patch else {
            return Err(GatewayError::Status {
                status: 400,
                message: format!("update of {collection} expects an object"),
            });
        };
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(&collection)
            .and_then(|table| table.iter_mut().find(|row| has_id(row, id)))
            .ok_or_else(|| GatewayError::NotFound(format!("{collection}/{id}")))?;
        if let Value::Object(existing) = row {
            for (key, value) in patch {
                if key != "id" {
                    existing.insert(key, value);
                }
            }
        }
        debug!("InMemoryGateway: update {}/{}", collection, id);
        Ok(row.clone())
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> GatewayResult<()> {
        self.begin(Operation::Delete)?;
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&collection)
            .ok_or_else(|| GatewayError::NotFound(format!("{collection}/{id}")))?;
        let before = table.len();
        table.retain(|row| !has_id(row, id));
        if table.len() == before {
            return Err(GatewayError::NotFound(format!("{collection}/{id}")));
        }
        debug!("InMemoryGateway: delete {}/{}", collection, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_id_and_select_orders_by_name() {
        let gateway = InMemoryGateway::new();
        gateway
            .insert(Collection::Doctors, json!({ "name": "Bimal Shah" }))
            .await
            .unwrap();
        let stored = gateway
            .insert(Collection::Doctors, json!({ "name": "Asha Rao" }))
            .await
            .unwrap();
        assert!(stored["id"].is_string());

        let rows = gateway
            .select(Collection::Doctors, &SelectQuery::all().order_by("name", true))
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Asha Rao", "Bimal Shah"]);
    }

    #[tokio::test]
    async fn update_merges_patch_and_keeps_id() {
        let gateway = InMemoryGateway::new();
        gateway
            .seed(Collection::Hospitals, vec![json!({ "id": "h1", "name": "City", "bed_count": 10 })])
            .await;
        let id = RecordId::new("h1").unwrap();
        let row = gateway
            .update(Collection::Hospitals, &id, json!({ "id": "other", "bed_count": 20 }))
            .await
            .unwrap();
        assert_eq!(row, json!({ "id": "h1", "name": "City", "bed_count": 20 }));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let gateway = InMemoryGateway::new();
        gateway
            .seed(Collection::MedicalShops, vec![json!({ "id": "s1", "name": "Care Pharmacy" })])
            .await;
        let missing = RecordId::new("s9").unwrap();
        let err = gateway.delete(Collection::MedicalShops, &missing).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
        assert_eq!(gateway.rows(Collection::MedicalShops).await.len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_applies_once_and_counts_calls() {
        let gateway = InMemoryGateway::new();
        gateway.fail_next(Operation::Select, GatewayError::Network("offline".into()));
        assert!(gateway.select(Collection::Doctors, &SelectQuery::all()).await.is_err());
        assert!(gateway.select(Collection::Doctors, &SelectQuery::all()).await.is_ok());
        assert_eq!(gateway.call_count(Operation::Select), 2);
        assert_eq!(gateway.write_count(), 0);
    }
}
