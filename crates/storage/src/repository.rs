use async_trait::async_trait;
use flashcards_core::model::ProgressSnapshot;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::codec::{decode_snapshot, encode_snapshot};

/// Fixed key of the slot that holds the serialized progress snapshot.
pub const PROGRESS_KEY: &str = "flashcardProgress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable home of the progress snapshot.
///
/// Both operations work on the whole snapshot: `save` overwrites whatever was
/// stored before, so the last writer wins.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Read the persisted snapshot.
    ///
    /// Returns an empty snapshot when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is corrupt, or
    /// `StorageError::Connection` if the backend cannot be read.
    async fn load(&self) -> Result<ProgressSnapshot, StorageError>;

    /// Overwrite the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be encoded or written.
    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;
}

/// In-memory key-value slot, useful for tests and throwaway sessions.
///
/// The snapshot is kept in its serialized form, exactly as a durable backend
/// would hold it.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored value, as if written by an earlier session.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw stored value, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the slot lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn load(&self) -> Result<ProgressSnapshot, StorageError> {
        let guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        decode_snapshot(guard.as_deref())
    }

    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let encoded = encode_snapshot(snapshot)?;
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(encoded);
        Ok(())
    }
}

/// Progress persistence behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressStore> = Arc::new(InMemoryProgressStore::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flashcards_core::model::CardId;

    fn graded_snapshot() -> ProgressSnapshot {
        let mut snapshot = ProgressSnapshot::new();
        snapshot.set_due_date(
            CardId::new("a").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        );
        snapshot
    }

    #[tokio::test]
    async fn load_without_saved_state_is_empty() {
        let store = InMemoryProgressStore::new();
        assert!(store.load().await.unwrap().is_empty());
        assert!(store.raw().unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryProgressStore::new();
        let snapshot = graded_snapshot();

        store.save(&snapshot).await.unwrap();

        assert_eq!(store.load().await.unwrap(), snapshot);
        assert_eq!(
            store.raw().unwrap().as_deref(),
            Some(r#"{"a":{"dueDate":"2024-01-04"}}"#)
        );
    }

    #[tokio::test]
    async fn save_overwrites_whole_value() {
        let store = InMemoryProgressStore::with_raw(r#"{"old":{"dueDate":"2020-01-01"}}"#);
        store.save(&graded_snapshot()).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.due_date(&CardId::new("old").unwrap()), None);
    }

    #[tokio::test]
    async fn corrupt_value_is_not_treated_as_empty() {
        let store = InMemoryProgressStore::with_raw("[1, 2");
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert_eq!(store.raw().unwrap().as_deref(), Some("[1, 2"));
    }

    #[tokio::test]
    async fn storage_in_memory_shares_one_slot() {
        let storage = Storage::in_memory();
        let clone = storage.clone();
        storage.progress.save(&graded_snapshot()).await.unwrap();
        assert_eq!(clone.progress.load().await.unwrap(), graded_snapshot());
    }
}
