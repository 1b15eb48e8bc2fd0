//! Shared error types for the services crate.

use thiserror::Error;

use flash_core::model::{CardError, CardId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CardStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardStoreError {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("card not found: {0}")]
    NotFound(CardId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Store(#[from] CardStoreError),
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    Store(#[from] CardStoreError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] CardStoreError),
}
