use std::sync::Arc;

use domain::normalize;
use sqlx::{Pool, Sqlite, Transaction};

use crate::{
    database_error::DatabaseError,
    models::{AliasRow, TranslationRow},
};

/// Persistent store of catalog entries and their aliases. Inserts never
/// overwrite: the first entry for an `(english_name, platform_scope)` pair wins.
#[derive(Debug)]
pub struct CatalogRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl CatalogRepository {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }

    pub async fn begin_transaction(&self) -> Result<Transaction<'_, Sqlite>, DatabaseError> {
        Ok(self.pool.begin().await?)
    }

    /// Returns `true` when the entry was inserted, `false` when it already existed.
    pub async fn add_entry(
        &self,
        english_name: &str,
        localized_name: &str,
        platform_scope: &str,
    ) -> Result<bool, DatabaseError> {
        let mut transaction = self.pool.begin().await?;
        let inserted = self
            .add_entry_with_tx(english_name, localized_name, platform_scope, &mut transaction)
            .await?;
        transaction.commit().await?;
        Ok(inserted)
    }

    pub async fn add_entry_with_tx(
        &self,
        english_name: &str,
        localized_name: &str,
        platform_scope: &str,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<bool, DatabaseError> {
        if english_name.is_empty() {
            return Err(DatabaseError::ValidationError(
                "english_name must not be empty".to_string(),
            ));
        }
        let result = sqlx::query(
            "INSERT OR IGNORE INTO translations (english_name, localized_name, platform_scope)
             VALUES (?, ?, ?)",
        )
        .bind(english_name)
        .bind(localized_name)
        .bind(platform_scope)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Registers `alias` for `english_name`. The normalized form is always
    /// derived from the alias text here; aliases without any normalizable
    /// content are not stored.
    pub async fn add_alias(&self, alias: &str, english_name: &str) -> Result<bool, DatabaseError> {
        let mut transaction = self.pool.begin().await?;
        let inserted = self
            .add_alias_with_tx(alias, english_name, &mut transaction)
            .await?;
        transaction.commit().await?;
        Ok(inserted)
    }

    pub async fn add_alias_with_tx(
        &self,
        alias: &str,
        english_name: &str,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<bool, DatabaseError> {
        let normalized_alias = normalize(alias);
        if normalized_alias.is_empty() {
            return Ok(false);
        }
        let result = sqlx::query(
            "INSERT OR IGNORE INTO aliases (alias, english_name, normalized_alias)
             VALUES (?, ?, ?)",
        )
        .bind(alias)
        .bind(english_name)
        .bind(normalized_alias)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All entries in insertion order.
    pub async fn get_entries(&self) -> Result<Vec<TranslationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, TranslationRow>(
            "SELECT id, english_name, localized_name, platform_scope FROM translations ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows)
    }

    /// All aliases in insertion order.
    pub async fn get_aliases(&self) -> Result<Vec<AliasRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AliasRow>(
            "SELECT id, alias, english_name, normalized_alias FROM aliases ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_entries(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM translations")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }
}
