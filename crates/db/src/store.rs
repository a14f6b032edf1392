//! [`TabularStore`] implementation over the collection tables.

use async_trait::async_trait;
use yacc_core::store::{Cell, StoreError, TabularStore};

use crate::repositories::CollectionRepo;
use crate::DbPool;

/// Tabular store persisted through sqlx.
#[derive(Clone)]
pub struct SqlStore {
    pool: DbPool,
}

impl SqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl TabularStore for SqlStore {
    async fn ensure_collection(&self, name: &str, header: &[&str]) -> Result<(), StoreError> {
        let header_json = serde_json::to_string(header).map_err(encoding_error)?;
        let created = CollectionRepo::create_if_absent(&self.pool, name, &header_json)
            .await
            .map_err(store_error)?;
        if created {
            tracing::info!(collection = name, columns = header.len(), "Collection created");
        }
        Ok(())
    }

    async fn row_count(&self, name: &str) -> Result<Option<u64>, StoreError> {
        if !CollectionRepo::exists(&self.pool, name)
            .await
            .map_err(store_error)?
        {
            return Ok(None);
        }
        let data_rows = CollectionRepo::count_rows(&self.pool, name)
            .await
            .map_err(store_error)?;
        Ok(Some(data_rows.max(0) as u64 + 1))
    }

    async fn append_row(&self, name: &str, cells: Vec<Cell>) -> Result<u64, StoreError> {
        let cells_json = serde_json::to_string(&cells).map_err(encoding_error)?;

        let mut tx = self.pool.begin().await.map_err(store_error)?;
        if !CollectionRepo::exists(&mut *tx, name)
            .await
            .map_err(store_error)?
        {
            return Err(StoreError::MissingCollection(name.to_string()));
        }
        let row_index = CollectionRepo::append(&mut *tx, name, &cells_json)
            .await
            .map_err(store_error)?;
        tx.commit().await.map_err(store_error)?;

        tracing::debug!(collection = name, row_index, "Row appended");
        Ok(row_index.max(0) as u64)
    }

    async fn collections(&self) -> Result<Vec<String>, StoreError> {
        CollectionRepo::list_names(&self.pool)
            .await
            .map_err(store_error)
    }
}

/// Classify a sqlx error: connectivity problems are `Unavailable`,
/// everything else is a backend rejection.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Configuration(_) => StoreError::Unavailable(err.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}

fn encoding_error(err: serde_json::Error) -> StoreError {
    StoreError::Backend(format!("row encoding failed: {err}"))
}
