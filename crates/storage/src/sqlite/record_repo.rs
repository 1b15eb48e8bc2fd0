use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{RecordKey, RecordRepository, StorageError};

#[async_trait]
impl RecordRepository for SqliteRepository {
    async fn load_record(&self, key: RecordKey) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT payload FROM records WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(payload))
    }

    async fn save_record(&self, key: RecordKey, payload: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO records (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key.as_str())
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
