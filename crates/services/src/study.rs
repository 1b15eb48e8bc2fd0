use flash_core::filter::{CardSelection, filter_cards};
use flash_core::model::Library;
use flash_core::study::{StudyAction, StudyOutcome, StudySession};
use tracing::debug;

use crate::card_store::CardStore;
use crate::error::StudyError;

/// Flip-card study over the filtered (unshuffled) deck, persisting the known
/// flag and strong topics as the user assesses cards.
#[derive(Clone)]
pub struct StudyService {
    store: CardStore,
}

impl StudyService {
    #[must_use]
    pub fn new(store: CardStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn start(&self, library: &Library, selection: &CardSelection) -> StudySession {
        let cards = filter_cards(&library.cards, selection, &library.strong_topics);
        debug!(total = cards.len(), "study deck prepared");
        StudySession::new(cards)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Store` if a changed record cannot be saved.
    pub async fn apply(
        &self,
        session: &mut StudySession,
        library: &mut Library,
        action: StudyAction,
    ) -> Result<StudyOutcome, StudyError> {
        let outcome = session.apply(action, library);
        if outcome.cards_changed() {
            self.store.save_cards(&library.cards).await?;
        }
        if outcome.strong_topics_changed() {
            self.store
                .save_strong_topics(&library.strong_topics)
                .await?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use flash_core::defaults::default_library;
    use flash_core::model::ChapterId;
    use storage::repository::{InMemoryRepository, RecordKey, RecordRepository};

    #[tokio::test]
    async fn know_and_dont_know_round_trip_through_store() {
        let repo = InMemoryRepository::new();
        let store = CardStore::new(Arc::new(repo.clone()));
        let svc = StudyService::new(store.clone());
        let mut library = default_library();

        let mut selection = CardSelection::all();
        selection.select_chapter(&library.subjects, ChapterId::new("physics"));
        let mut session = svc.start(&library, &selection);
        assert_eq!(session.cards().len(), 1);

        let id = session.current().unwrap().id.clone();
        svc.apply(&mut session, &mut library, StudyAction::Know)
            .await
            .unwrap();
        let reloaded = store.load_all().await.unwrap();
        assert!(reloaded.card(&id).unwrap().known);
        assert!(reloaded.strong_topics.contains(&id));

        svc.apply(&mut session, &mut library, StudyAction::DontKnow)
            .await
            .unwrap();
        let reloaded = store.load_all().await.unwrap();
        assert!(!reloaded.card(&id).unwrap().known);
        assert!(reloaded.strong_topics.contains(&id));
    }

    #[tokio::test]
    async fn navigation_writes_nothing() {
        let repo = InMemoryRepository::new();
        let store = CardStore::new(Arc::new(repo.clone()));
        let svc = StudyService::new(store);
        let mut library = default_library();
        let mut session = svc.start(&library, &CardSelection::all());

        svc.apply(&mut session, &mut library, StudyAction::Next)
            .await
            .unwrap();
        svc.apply(&mut session, &mut library, StudyAction::Flip)
            .await
            .unwrap();
        for key in RecordKey::ALL {
            assert!(repo.load_record(key).await.unwrap().is_none());
        }
    }
}
