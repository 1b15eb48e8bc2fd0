use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::card_store::CardStore;
use crate::error::AppServicesError;
use crate::quiz::QuizLoopService;
use crate::study::StudyService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    card_store: CardStore,
    quiz_loop: Arc<QuizLoopService>,
    study: Arc<StudyService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let card_store = CardStore::new(Arc::clone(&storage.records));
        let quiz_loop = Arc::new(QuizLoopService::new(clock, card_store.clone()));
        let study = Arc::new(StudyService::new(card_store.clone()));
        Self {
            card_store,
            quiz_loop,
            study,
        }
    }

    #[must_use]
    pub fn card_store(&self) -> &CardStore {
        &self.card_store
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }
}
