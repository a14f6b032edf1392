//! Collection entity models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use yacc_core::store::Cell;

/// A row from the `collections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub name: String,
    /// JSON array of column names.
    pub header: String,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    pub fn columns(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.header)
    }
}

/// A row from the `collection_rows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectionRow {
    pub collection: String,
    pub row_index: i64,
    /// JSON array of [`Cell`] values.
    pub cells: String,
    pub created_at: DateTime<Utc>,
}

impl CollectionRow {
    pub fn decode_cells(&self) -> Result<Vec<Cell>, serde_json::Error> {
        serde_json::from_str(&self.cells)
    }
}
