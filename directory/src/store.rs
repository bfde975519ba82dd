// directory/src/store.rs

use models::{DirectoryError, DirectoryResult, GatewayError, Listing, RecordId};
use storage_gateway::{Gateway, SelectQuery};
use tracing::{debug, info, warn};

use crate::entity::DirectoryEntity;
use crate::filter::{filter, FilterQuery};
use crate::notify::Notifier;

/// How a failed load is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Public pages: substitute the built-in samples.
    Directory,
    /// Admin pages: surface the error, keep the collection empty.
    Admin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    Fallback(GatewayError),
}

/// The local copy of one listing collection for one page.
#[derive(Debug, Clone)]
pub struct EntityListStore<T> {
    records: Vec<T>,
    loading: bool,
    mode: LoadMode,
}

impl<T: DirectoryEntity> EntityListStore<T> {
    pub fn new(mode: LoadMode) -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            mode,
        }
    }

    /// A store already holding `records`, as if loaded.
    pub fn with_records(mode: LoadMode, records: Vec<T>) -> Self {
        Self {
            records,
            loading: false,
            mode,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == Some(id))
    }

    /// Replaces the whole collection with the gateway's rows ordered by name.
    pub async fn load(&mut self, gateway: &dyn Gateway, notifier: &dyn Notifier) -> DirectoryResult<LoadOutcome> {
        let collection = T::KIND.collection();
        self.loading = true;
        let fetched = Self::fetch(gateway).await;
        self.loading = false;

        match fetched {
            Ok(mut records) => {
                if let Err(e) = T::enrich(&mut records, gateway).await {
                    warn!(%collection, error = %e, "related lookup failed; continuing without it");
                }
                info!(%collection, count = records.len(), "loaded collection");
                let count = records.len();
                self.records = records;
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                warn!(%collection, error = %e, mode = ?self.mode, "failed to load collection");
                notifier.error(&format!("Failed to load {}: {}", collection, e));
                match self.mode {
                    LoadMode::Directory => {
                        self.records = T::fallback();
                        Ok(LoadOutcome::Fallback(e))
                    }
                    LoadMode::Admin => {
                        self.records.clear();
                        Err(DirectoryError::Gateway(e))
                    }
                }
            }
        }
    }

    async fn fetch(gateway: &dyn Gateway) -> Result<Vec<T>, GatewayError> {
        let query = SelectQuery::all().order_by("name", true);
        let rows = gateway.select(T::KIND.collection(), &query).await?;
        rows.into_iter().map(T::from_row).collect()
    }

    /// Appends a record just created by the gateway. A record whose id is
    /// already present replaces it instead, so a write is never reflected
    /// twice.
    pub fn reconcile_insert(&mut self, record: T) -> DirectoryResult<()> {
        let id = record
            .id()
            .cloned()
            .ok_or_else(|| DirectoryError::Unexpected("created record has no identifier".to_string()))?;
        match self.position(&id) {
            Some(index) => {
                debug!(%id, "insert reconciled onto existing record");
                self.records[index] = record;
            }
            None => self.records.push(record),
        }
        Ok(())
    }

    /// Replaces the record matching `id` in place. A record missing locally
    /// is appended.
    pub fn reconcile_update(&mut self, id: &RecordId, record: T) -> DirectoryResult<()> {
        if record.id().is_some_and(|own| own != id) {
            return Err(DirectoryError::Unexpected(format!(
                "updated record does not match identifier {id}"
            )));
        }
        match self.position(id) {
            Some(index) => self.records[index] = record,
            None => {
                debug!(%id, "updated record was not held locally; appending");
                self.records.push(record);
            }
        }
        Ok(())
    }

    /// Removes the record matching `id`; the others keep their order.
    /// Returns whether anything was removed.
    pub fn reconcile_delete(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != Some(id));
        self.records.len() != before
    }

    pub fn view(&self, query: &FilterQuery<T>) -> Vec<&T> {
        filter(&self.records, query)
    }
}
