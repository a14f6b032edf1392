//! Repository for the `collections` and `collection_rows` tables.

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::models::collection::{Collection, CollectionRow};

/// Column list for `collection_rows` queries.
const ROW_COLUMNS: &str = "collection, row_index, cells, created_at";

/// Provides create/append/count operations for collections.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert the collection unless it already exists.
    ///
    /// Returns `true` if a new collection was created.
    pub async fn create_if_absent<'e, E>(
        executor: E,
        name: &str,
        header_json: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO collections (name, header, created_at) \
             VALUES (?, ?, ?) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(header_json)
        .bind(Utc::now())
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists<'e, E>(executor: E, name: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM collections WHERE name = ?")
            .bind(name)
            .fetch_optional(executor)
            .await?;
        Ok(found.is_some())
    }

    pub async fn find<'e, E>(executor: E, name: &str) -> Result<Option<Collection>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Collection>(
            "SELECT name, header, created_at FROM collections WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(executor)
        .await
    }

    /// Names of all collections in creation order.
    pub async fn list_names<'e, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar("SELECT name FROM collections ORDER BY created_at, name")
            .fetch_all(executor)
            .await
    }

    /// Number of data rows (header excluded).
    pub async fn count_rows<'e, E>(executor: E, name: &str) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM collection_rows WHERE collection = ?")
            .bind(name)
            .fetch_one(executor)
            .await
    }

    /// Append a data row at the next row index, returning that index.
    ///
    /// The index is computed and written in one statement. The header
    /// occupies row 1, so the returned index equals the collection's row
    /// count including the header.
    pub async fn append<'e, E>(executor: E, name: &str, cells_json: &str) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar(
            "INSERT INTO collection_rows (collection, row_index, cells, created_at) \
             SELECT ?, COALESCE(MAX(row_index), 1) + 1, ?, ? \
             FROM collection_rows WHERE collection = ? \
             RETURNING row_index",
        )
        .bind(name)
        .bind(cells_json)
        .bind(Utc::now())
        .bind(name)
        .fetch_one(executor)
        .await
    }

    /// All data rows of a collection in append order.
    pub async fn list_rows<'e, E>(executor: E, name: &str) -> Result<Vec<CollectionRow>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "SELECT {ROW_COLUMNS} FROM collection_rows \
             WHERE collection = ? \
             ORDER BY row_index ASC"
        );
        sqlx::query_as::<_, CollectionRow>(&query)
            .bind(name)
            .fetch_all(executor)
            .await
    }
}
