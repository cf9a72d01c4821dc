use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use flashcards_core::model::ProgressSnapshot;

use crate::codec::{decode_snapshot, encode_snapshot};
use crate::repository::{PROGRESS_KEY, ProgressStore, StorageError};

use super::SqliteRepository;

impl SqliteRepository {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the query fails.
    pub async fn get_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn put_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProgressStore for SqliteRepository {
    async fn load(&self) -> Result<ProgressSnapshot, StorageError> {
        let raw = self.get_slot(PROGRESS_KEY).await?;
        decode_snapshot(raw.as_deref())
    }

    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let encoded = encode_snapshot(snapshot)?;
        self.put_slot(PROGRESS_KEY, &encoded).await
    }
}
