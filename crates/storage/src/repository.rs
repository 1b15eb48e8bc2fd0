use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The three independent records the application persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Flashcards,
    Subjects,
    StrongTopics,
}

impl RecordKey {
    pub const ALL: [RecordKey; 3] = [
        RecordKey::Flashcards,
        RecordKey::Subjects,
        RecordKey::StrongTopics,
    ];

    /// Stable key under which the record is stored.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKey::Flashcards => "flashcards",
            RecordKey::Subjects => "subjects",
            RecordKey::StrongTopics => "strongTopics",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StorageError::Serialization(format!("unknown record key: {s}")))
    }
}

/// Key-value contract: each record is a serialized snapshot that is read
/// wholesale and overwritten wholesale.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetch the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_record(&self, key: RecordKey) -> Result<Option<String>, StorageError>;

    /// Store `payload` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the payload cannot be written.
    async fn save_record(&self, key: RecordKey, payload: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<RecordKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl RecordRepository for InMemoryRepository {
    async fn load_record(&self, key: RecordKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn save_record(&self, key: RecordKey, payload: &str) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, payload.to_owned());
        Ok(())
    }
}

/// Wraps the record repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn RecordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let records: Arc<dyn RecordRepository> = Arc::new(InMemoryRepository::new());
        Self { records }
    }
}
