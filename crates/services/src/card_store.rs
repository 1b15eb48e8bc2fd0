use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use flash_core::defaults::{default_cards, default_library, default_subjects};
use flash_core::model::{Card, CardDraft, CardId, Library, StrongTopics, Subject};
use storage::repository::{RecordKey, RecordRepository, StorageError};

use crate::error::CardStoreError;

/// Loads and saves the three persisted records (cards, subject tree, strong
/// topics) and owns card creation.
#[derive(Clone)]
pub struct CardStore {
    records: Arc<dyn RecordRepository>,
}

impl CardStore {
    #[must_use]
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }

    /// Load every record. Missing or unreadable payloads fall back to the
    /// built-in defaults for that record only.
    ///
    /// # Errors
    ///
    /// Returns `CardStoreError::Storage` if the backend itself cannot be read.
    pub async fn load_all(&self) -> Result<Library, CardStoreError> {
        let cards: Vec<Card> = self.load_or(RecordKey::Flashcards, default_cards).await?;
        let subjects: Vec<Subject> = self.load_or(RecordKey::Subjects, default_subjects).await?;
        let strong_topics: StrongTopics =
            self.load_or(RecordKey::StrongTopics, StrongTopics::new).await?;

        debug!(
            cards = cards.len(),
            subjects = subjects.len(),
            strong = strong_topics.len(),
            "library loaded"
        );
        Ok(Library::new(cards, subjects, strong_topics))
    }

    /// Overwrite all three records.
    ///
    /// # Errors
    ///
    /// Returns `CardStoreError::Storage` if any record cannot be written.
    pub async fn save(&self, library: &Library) -> Result<(), CardStoreError> {
        self.save_cards(&library.cards).await?;
        self.save_subjects(&library.subjects).await?;
        self.save_strong_topics(&library.strong_topics).await
    }

    /// # Errors
    ///
    /// Returns `CardStoreError::Storage` if the record cannot be written.
    pub async fn save_cards(&self, cards: &[Card]) -> Result<(), CardStoreError> {
        self.store(RecordKey::Flashcards, cards).await
    }

    /// # Errors
    ///
    /// Returns `CardStoreError::Storage` if the record cannot be written.
    pub async fn save_subjects(&self, subjects: &[Subject]) -> Result<(), CardStoreError> {
        self.store(RecordKey::Subjects, subjects).await
    }

    /// # Errors
    ///
    /// Returns `CardStoreError::Storage` if the record cannot be written.
    pub async fn save_strong_topics(&self, strong: &StrongTopics) -> Result<(), CardStoreError> {
        self.store(RecordKey::StrongTopics, strong).await
    }

    /// Validate a draft, append the new card and persist the card collection.
    ///
    /// # Errors
    ///
    /// Returns `CardStoreError::Card` for validation failures.
    /// Returns `CardStoreError::Storage` if persistence fails.
    pub async fn create(
        &self,
        library: &mut Library,
        draft: CardDraft,
    ) -> Result<Card, CardStoreError> {
        let card = draft.validate(&library.subjects)?.assign_id(CardId::generate());
        library.cards.push(card.clone());
        self.save_cards(&library.cards).await?;
        info!(card_id = %card.id, subject = %card.subject_id, "flashcard created");
        Ok(card)
    }

    /// Set a card's known flag, persisting the card collection when it changed.
    ///
    /// # Errors
    ///
    /// Returns `CardStoreError::NotFound` for an unknown id.
    /// Returns `CardStoreError::Storage` if persistence fails.
    pub async fn set_known(
        &self,
        library: &mut Library,
        id: &CardId,
        known: bool,
    ) -> Result<bool, CardStoreError> {
        let changed = library
            .set_known(id, known)
            .ok_or_else(|| CardStoreError::NotFound(id.clone()))?;
        if changed {
            self.save_cards(&library.cards).await?;
        }
        Ok(changed)
    }

    /// Add or remove a card from the strong-topic set, persisting it when it changed.
    ///
    /// # Errors
    ///
    /// Returns `CardStoreError::NotFound` for an unknown id.
    /// Returns `CardStoreError::Storage` if persistence fails.
    pub async fn mark_strong(
        &self,
        library: &mut Library,
        id: &CardId,
        strong: bool,
    ) -> Result<bool, CardStoreError> {
        if library.card(id).is_none() {
            return Err(CardStoreError::NotFound(id.clone()));
        }
        let changed = library.strong_topics.mark(id, strong);
        if changed {
            self.save_strong_topics(&library.strong_topics).await?;
        }
        Ok(changed)
    }

    /// Write the built-in content. Without `force`, a store that already holds
    /// any record is left untouched. Returns whether anything was written.
    ///
    /// # Errors
    ///
    /// Returns `CardStoreError::Storage` if the backend cannot be read or written.
    pub async fn seed_defaults(&self, force: bool) -> Result<bool, CardStoreError> {
        if !force {
            for key in RecordKey::ALL {
                if self.records.load_record(key).await?.is_some() {
                    info!(%key, "store already populated; skipping seed");
                    return Ok(false);
                }
            }
        }
        self.save(&default_library()).await?;
        info!(force, "default content written");
        Ok(true)
    }

    async fn load_or<T, F>(&self, key: RecordKey, default: F) -> Result<T, CardStoreError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let Some(payload) = self.records.load_record(key).await? else {
            debug!(%key, "record missing; using defaults");
            return Ok(default());
        };
        match serde_json::from_str(&payload) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(%key, error = %err, "malformed record; using defaults");
                Ok(default())
            }
        }
    }

    async fn store<T>(&self, key: RecordKey, value: &T) -> Result<(), CardStoreError>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.records.save_record(key, &payload).await?;
        debug!(%key, bytes = payload.len(), "record saved");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
