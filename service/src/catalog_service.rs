use std::sync::Arc;

use database::repository::catalog_repository::CatalogRepository;

use crate::{catalog_store::CatalogStore, error::Error};

/// Moves catalog contents between the in-memory [`CatalogStore`] and the
/// database.
pub struct CatalogService {
    repository: Arc<CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<CatalogRepository>) -> Self {
        CatalogService { repository }
    }

    /// Writes every entry and alias of `store` in a single transaction.
    /// Existing rows are kept; returns the number of newly stored entries.
    pub async fn persist(&self, store: &CatalogStore) -> Result<usize, Error> {
        let mut transaction = self.repository.begin_transaction().await?;

        let mut inserted = 0;
        for entry in store.entries() {
            if self
                .repository
                .add_entry_with_tx(
                    &entry.canonical_name,
                    &entry.localized_name,
                    &entry.platform_scope,
                    &mut transaction,
                )
                .await?
            {
                inserted += 1;
            }
        }
        for alias in store.aliases() {
            self.repository
                .add_alias_with_tx(alias.alias_text(), alias.canonical_name(), &mut transaction)
                .await?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| Error::DbError(format!("Failed to commit catalog: {}", e)))?;
        tracing::info!(
            entries = store.len(),
            inserted,
            aliases = store.aliases().len(),
            "Persisted catalog"
        );
        Ok(inserted)
    }

    /// Rebuilds a store from the database, in insertion order.
    pub async fn load(&self) -> Result<CatalogStore, Error> {
        let entries = self.repository.get_entries().await?;
        let aliases = self.repository.get_aliases().await?;

        let mut store = CatalogStore::new();
        for entry in &entries {
            store.insert(&entry.english_name, &entry.localized_name, &entry.platform_scope);
        }
        for alias in &aliases {
            store.add_alias(&alias.alias, &alias.english_name);
        }
        tracing::info!(entries = store.len(), aliases = store.aliases().len(), "Loaded catalog");
        Ok(store)
    }
}
