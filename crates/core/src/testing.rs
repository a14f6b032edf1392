//! In-memory collaborators for unit tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::mailer::{MailError, Mailer, OutgoingEmail};
use crate::store::{Cell, StoreError, TabularStore};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Vec<Cell>>>>,
    rejected: Mutex<HashSet<String>>,
    pub unavailable: AtomicBool,
}

impl MemoryStore {
    pub async fn rows(&self, name: &str) -> Vec<Vec<Cell>> {
        self.collections
            .lock()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn reject_appends_to(&self, name: &str) {
        self.rejected.lock().await.insert(name.to_string());
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TabularStore for MemoryStore {
    async fn ensure_collection(&self, name: &str, header: &[&str]) -> Result<(), StoreError> {
        self.check_available()?;
        self.collections
            .lock()
            .await
            .entry(name.to_string())
            .or_insert_with(|| vec![header.iter().map(|h| Cell::text(*h)).collect()]);
        Ok(())
    }

    async fn row_count(&self, name: &str) -> Result<Option<u64>, StoreError> {
        self.check_available()?;
        Ok(self
            .collections
            .lock()
            .await
            .get(name)
            .map(|rows| rows.len() as u64))
    }

    async fn append_row(&self, name: &str, cells: Vec<Cell>) -> Result<u64, StoreError> {
        self.check_available()?;
        if self.rejected.lock().await.contains(name) {
            return Err(StoreError::Backend(format!("append to '{name}' rejected")));
        }
        let mut collections = self.collections.lock().await;
        let rows = collections
            .get_mut(name)
            .ok_or_else(|| StoreError::MissingCollection(name.to_string()))?;
        rows.push(cells);
        Ok(rows.len() as u64)
    }

    async fn collections(&self) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        Ok(self.collections.lock().await.keys().cloned().collect())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    pub fail: AtomicBool,
    /// Milliseconds each send stalls before completing.
    pub delay_ms: AtomicU64,
}

impl RecordingMailer {
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Transport("smtp relay refused connection".into()));
        }
        self.sent.lock().await.push(email);
        Ok(())
    }
}
