use flash_core::filter::{CardSelection, filter_cards};
use flash_core::model::{Card, Library};
use flash_core::quiz::{IgnoreReason, QuizConfig, QuizEvent, QuizOutcome, QuizSession, QuizStats};
use flash_core::shuffle::shuffled;
use tracing::{debug, info};

use crate::Clock;
use crate::card_store::CardStore;
use crate::error::QuizError;

/// Profile numbers: strong/weak badge counts plus the latest quiz stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub strong: usize,
    pub weak: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub average_time: f64,
}

impl ProfileStats {
    #[must_use]
    pub fn from_parts(library: &Library, stats: &QuizStats) -> Self {
        let counts = library.topic_counts();
        Self {
            strong: counts.strong,
            weak: counts.weak,
            answered: stats.answered(),
            correct: stats.correct(),
            incorrect: stats.incorrect(),
            average_time: stats.average_time(),
        }
    }
}

/// Drives a quiz session: builds the shuffled deck from the current selection,
/// stamps events with the clock and persists strong-topic changes.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    store: CardStore,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, store: CardStore) -> Self {
        Self { clock, store }
    }

    /// Filter and shuffle the library into an idle session.
    #[must_use]
    pub fn prepare_session(
        &self,
        library: &Library,
        selection: &CardSelection,
        config: QuizConfig,
    ) -> QuizSession {
        let deck = Self::deck_for(library, selection);
        debug!(total = deck.len(), "quiz deck prepared");
        QuizSession::new(deck, config)
    }

    /// Rebuild the deck after the selection changed. Ignored while running.
    pub fn refresh(
        &self,
        session: &mut QuizSession,
        library: &Library,
        selection: &CardSelection,
    ) -> QuizOutcome {
        session.prepare(Self::deck_for(library, selection))
    }

    /// Apply one event, persisting the strong-topic set if the event changed it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Store` if the strong topics cannot be saved.
    pub async fn apply(
        &self,
        session: &mut QuizSession,
        library: &mut Library,
        event: QuizEvent,
    ) -> Result<QuizOutcome, QuizError> {
        let outcome = session.apply_event(event, &mut library.strong_topics, self.clock.now());

        match &outcome {
            QuizOutcome::Started { total } => info!(total, "quiz started"),
            QuizOutcome::Stopped => info!("quiz abandoned"),
            QuizOutcome::Ignored(IgnoreReason::StaleTick) => debug!("stale timer tick dropped"),
            QuizOutcome::Ignored(reason) => debug!(reason = reason.message(), "quiz event ignored"),
            _ => {}
        }
        if let Some(reason) = outcome.completion() {
            info!(
                ?reason,
                score = session.score(),
                answered = session.results().len(),
                "quiz completed"
            );
        }

        if outcome.strong_topics_changed() {
            self.store
                .save_strong_topics(&library.strong_topics)
                .await?;
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn profile_stats(&self, library: &Library, session: &QuizSession) -> ProfileStats {
        ProfileStats::from_parts(library, &session.stats())
    }

    fn deck_for(library: &Library, selection: &CardSelection) -> Vec<Card> {
        shuffled(&filter_cards(
            &library.cards,
            selection,
            &library.strong_topics,
        ))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use flash_core::defaults::default_library;
    use flash_core::filter::StrengthFilter;
    use flash_core::model::{CardId, SubjectId};
    use flash_core::quiz::QuizPhase;
    use flash_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, RecordKey, RecordRepository};

    fn service(repo: &InMemoryRepository) -> QuizLoopService {
        QuizLoopService::new(Clock::fixed(fixed_now()), CardStore::new(Arc::new(repo.clone())))
    }

    #[test]
    fn prepared_deck_respects_selection() {
        let svc = service(&InMemoryRepository::new());
        let library = default_library();
        let mut selection = CardSelection::all();
        selection.select_subject(Some(SubjectId::new("science")));

        let session = svc.prepare_session(&library, &selection, QuizConfig::default());
        assert_eq!(session.phase(), QuizPhase::Idle);
        assert_eq!(session.deck().len(), 3);
        assert!(session.deck().iter().all(|c| c.subject_id.as_str() == "science"));
    }

    #[tokio::test]
    async fn answers_persist_strong_topics() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut library = default_library();
        let mut session = svc.prepare_session(&library, &CardSelection::all(), QuizConfig::default());

        svc.apply(&mut session, &mut library, QuizEvent::Start).await.unwrap();
        let answer = session.current_card().unwrap().answer.clone();
        let id = session.current_card().unwrap().id.clone();
        let outcome = svc
            .apply(&mut session, &mut library, QuizEvent::Submit(answer))
            .await
            .unwrap();

        assert!(outcome.strong_topics_changed());
        let payload = repo.load_record(RecordKey::StrongTopics).await.unwrap().unwrap();
        assert_eq!(payload, format!(r#"["{}"]"#, id.as_str()));
    }

    #[tokio::test]
    async fn ignored_events_do_not_touch_storage() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut library = default_library();
        let mut session = svc.prepare_session(&library, &CardSelection::all(), QuizConfig::default());

        let outcome = svc
            .apply(&mut session, &mut library, QuizEvent::Submit("x".into()))
            .await
            .unwrap();
        assert!(outcome.is_ignored());
        assert!(repo.load_record(RecordKey::StrongTopics).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn refresh_picks_up_strength_filter() {
        let svc = service(&InMemoryRepository::new());
        let mut library = default_library();
        library.strong_topics.mark(&CardId::new("1"), true);
        let mut session = svc.prepare_session(&library, &CardSelection::all(), QuizConfig::default());

        let strong_only = CardSelection::all().with_strength(StrengthFilter::Strong);
        assert_eq!(
            svc.refresh(&mut session, &library, &strong_only),
            QuizOutcome::Prepared { total: 1 }
        );
    }

    #[test]
    fn profile_stats_combine_counts_and_quiz() {
        let svc = service(&InMemoryRepository::new());
        let mut library = default_library();
        library.strong_topics.mark(&CardId::new("1"), true);
        library.strong_topics.mark(&CardId::new("gone"), true);
        let session = svc.prepare_session(&library, &CardSelection::all(), QuizConfig::default());

        let stats = svc.profile_stats(&library, &session);
        assert_eq!(stats.strong, 2);
        assert_eq!(stats.weak, 7);
        assert_eq!(stats.answered, 0);
    }
}
