// directory/src/commands.rs

use models::{DirectoryError, DirectoryResult, Listing, RecordId};
use serde_json::Value;
use storage_gateway::Gateway;
use tracing::{error, info, warn};

use crate::entity::DirectoryEntity;
use crate::forms::ListingForm;
use crate::notify::Notifier;
use crate::store::EntityListStore;

/// Admin create/update/delete over one [`EntityListStore`].
///
/// Each command validates first, performs exactly one gateway write, and only
/// after that write succeeds reconciles the store. A failure at any step
/// leaves the store as it was and raises an error notification.
pub struct CrudCommands<'a> {
    gateway: &'a dyn Gateway,
    notifier: &'a dyn Notifier,
}

impl<'a> CrudCommands<'a> {
    pub fn new(gateway: &'a dyn Gateway, notifier: &'a dyn Notifier) -> Self {
        Self { gateway, notifier }
    }

    pub async fn create<F: ListingForm>(
        &self,
        store: &mut EntityListStore<F::Record>,
        form: &F,
    ) -> DirectoryResult<F::Record> {
        let kind = <F::Record as Listing>::KIND;
        let label = kind.label();
        let record = self.validated(form)?;
        let row = record
            .to_row()
            .map_err(|e| self.fail(label, "add", DirectoryError::Unexpected(e.to_string())))?;

        let written = self
            .gateway
            .insert(kind.collection(), row)
            .await
            .map_err(|e| self.fail(label, "add", e.into()))?;
        let created = self.decode::<F::Record>(written).await.map_err(|e| self.fail(label, "add", e))?;

        store
            .reconcile_insert(created.clone())
            .map_err(|e| self.fail(label, "add", e))?;
        info!(%kind, id = ?created.id(), "created listing");
        self.notifier.success(&format!("{label} added successfully"));
        Ok(created)
    }

    pub async fn update<F: ListingForm>(
        &self,
        store: &mut EntityListStore<F::Record>,
        id: &RecordId,
        form: &F,
    ) -> DirectoryResult<F::Record> {
        let kind = <F::Record as Listing>::KIND;
        let label = kind.label();
        let record = self.validated(form)?;
        let patch = record
            .to_row()
            .map_err(|e| self.fail(label, "update", DirectoryError::Unexpected(e.to_string())))?;

        let mut written = self
            .gateway
            .update(kind.collection(), id, patch)
            .await
            .map_err(|e| self.fail(label, "update", e.into()))?;
        if let Value::Object(map) = &mut written {
            map.entry("id").or_insert_with(|| Value::String(id.to_string()));
        }
        let updated = self.decode::<F::Record>(written).await.map_err(|e| self.fail(label, "update", e))?;

        store
            .reconcile_update(id, updated.clone())
            .map_err(|e| self.fail(label, "update", e))?;
        info!(%kind, %id, "updated listing");
        self.notifier.success(&format!("{label} updated successfully"));
        Ok(updated)
    }

    pub async fn delete<T: DirectoryEntity>(&self, store: &mut EntityListStore<T>, id: &RecordId) -> DirectoryResult<()> {
        let label = T::KIND.label();
        self.gateway
            .delete(T::KIND.collection(), id)
            .await
            .map_err(|e| self.fail(label, "delete", e.into()))?;

        if !store.reconcile_delete(id) {
            warn!(kind = %T::KIND, %id, "deleted record was not held locally");
        }
        info!(kind = %T::KIND, %id, "deleted listing");
        self.notifier.success(&format!("{label} deleted successfully"));
        Ok(())
    }

    fn validated<F: ListingForm>(&self, form: &F) -> DirectoryResult<F::Record> {
        let kind = <F::Record as Listing>::KIND;
        form.validate().map_err(|errors| {
            warn!(%kind, %errors, "rejected invalid form");
            self.notifier.error("Please correct the highlighted fields");
            DirectoryError::Validation(errors)
        })
    }

    /// Decodes the row the gateway returned and fills locally derived fields.
    async fn decode<T: DirectoryEntity>(&self, row: Value) -> DirectoryResult<T> {
        let mut record = T::from_row(row).map_err(|e| DirectoryError::Unexpected(e.to_string()))?;
        if let Err(e) = T::enrich(std::slice::from_mut(&mut record), self.gateway).await {
            warn!(kind = %T::KIND, error = %e, "related lookup failed after write");
        }
        Ok(record)
    }

    fn fail(&self, label: &str, action: &str, err: DirectoryError) -> DirectoryError {
        error!(%label, %action, error = %err, "listing command failed");
        self.notifier.error(&format!("Failed to {action} {}: {err}", label.to_lowercase()));
        err
    }
}
