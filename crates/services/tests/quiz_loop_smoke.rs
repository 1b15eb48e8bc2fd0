use chrono::Duration;
use flash_core::filter::CardSelection;
use flash_core::model::{CardDraft, ChapterId, SubjectId};
use flash_core::quiz::{CompletionReason, QuizConfig, QuizEvent, QuizOutcome, QuizPhase};
use flash_core::time::fixed_now;
use services::{AppServices, Clock};

#[tokio::test]
async fn quiz_loop_scores_times_and_persists() {
    let (clock, hand) = Clock::manual(fixed_now());
    let services = AppServices::in_memory(clock);
    let store = services.card_store();

    let mut library = store.load_all().await.unwrap();
    library.cards.clear();
    for (q, a) in [("2+2", "4"), ("3+3", "6")] {
        let draft = CardDraft::new(q, a, SubjectId::new("math"), ChapterId::new("algebra"));
        store.create(&mut library, draft).await.unwrap();
    }

    let quiz = services.quiz_loop();
    let mut session = quiz.prepare_session(&library, &CardSelection::all(), QuizConfig::default());
    let outcome = quiz
        .apply(&mut session, &mut library, QuizEvent::Start)
        .await
        .unwrap();
    assert_eq!(outcome, QuizOutcome::Started { total: 2 });

    let mut wrong_id = None;
    for delay_ms in [2_500, 4_000] {
        hand.advance(Duration::milliseconds(delay_ms));
        let card = session.current_card().unwrap().clone();
        // Answer "2+2" correctly and miss the other one.
        let input = if card.question == "2+2" {
            " 4 ".to_string()
        } else {
            wrong_id = Some(card.id.clone());
            "six".to_string()
        };
        quiz.apply(&mut session, &mut library, QuizEvent::Submit(input))
            .await
            .unwrap();
    }

    assert_eq!(session.phase(), QuizPhase::Completed);
    let report = session.report().unwrap();
    assert_eq!(report.reason, CompletionReason::DeckExhausted);
    assert_eq!(report.score, 1);
    assert_eq!(report.results.len(), 2);
    assert!((report.average_time - 3.25).abs() < 1e-9);

    let reloaded = store.load_all().await.unwrap();
    assert_eq!(reloaded.cards.len(), 2);
    assert_eq!(reloaded.strong_topics.len(), 1);
    assert!(!reloaded.strong_topics.contains(&wrong_id.unwrap()));

    let stats = quiz.profile_stats(&reloaded, &session);
    assert_eq!((stats.strong, stats.weak), (1, 1));
    assert_eq!((stats.correct, stats.incorrect), (1, 1));
}

#[tokio::test]
async fn restart_after_completion_starts_fresh() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let mut library = services.card_store().load_all().await.unwrap();
    let quiz = services.quiz_loop();

    let mut selection = CardSelection::all();
    selection.select_chapter(&library.subjects, ChapterId::new("calculus"));
    let mut session = quiz.prepare_session(&library, &selection, QuizConfig::timed(30));

    quiz.apply(&mut session, &mut library, QuizEvent::Start)
        .await
        .unwrap();
    quiz.apply(&mut session, &mut library, QuizEvent::Submit("cos(x)".into()))
        .await
        .unwrap();
    assert_eq!(session.phase(), QuizPhase::Completed);

    quiz.apply(&mut session, &mut library, QuizEvent::Start)
        .await
        .unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, QuizPhase::Running);
    assert_eq!(snapshot.answered, 0);
    assert_eq!(snapshot.time_remaining, 30);
}
