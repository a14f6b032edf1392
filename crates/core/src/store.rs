//! Tabular store collaborator.
//!
//! Registrations and waitlist entries persist as rows in named collections.
//! Each collection starts with a header row followed by data rows in append
//! order; rows are never updated or deleted through this interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, TIMESTAMP_FORMAT};

/// Collection holding one row per confirmed registration.
pub const REGISTRATIONS: &str = "Registrations";

/// Collection holding one row per waitlist entry.
pub const WAITLIST: &str = "Waitlist";

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single value within a stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Integer(i64),
    Timestamp(Timestamp),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(n) => write!(f, "{n}"),
            Cell::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (missing, permission denied, offline).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A row was appended to a collection that was never created.
    #[error("Collection '{0}' does not exist")]
    MissingCollection(String),

    /// The backend rejected the operation.
    #[error("Store backend error: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// TabularStore
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Create `name` with `header` as its first row. No-op when it exists.
    async fn ensure_collection(&self, name: &str, header: &[&str]) -> Result<(), StoreError>;

    /// Rows in `name`, header included; `None` if the collection is absent.
    async fn row_count(&self, name: &str) -> Result<Option<u64>, StoreError>;

    /// Append a data row, returning the collection's new row count.
    async fn append_row(&self, name: &str, cells: Vec<Cell>) -> Result<u64, StoreError>;

    /// Names of all existing collections.
    async fn collections(&self) -> Result<Vec<String>, StoreError>;

    /// Data rows in `name`, excluding the header. A missing collection has none.
    async fn data_row_count(&self, name: &str) -> Result<u64, StoreError> {
        Ok(self
            .row_count(name)
            .await?
            .map_or(0, |rows| rows.saturating_sub(1)))
    }
}
