use flash_core::filter::{CardSelection, StrengthFilter, filter_cards};
use flash_core::model::{Card, CardId, ChapterId, StrongTopics, SubjectId};
use flash_core::quiz::{QuizConfig, QuizPhase, QuizSession, answers_match};
use flash_core::shuffle::shuffled;
use flash_core::time::fixed_now;
use proptest::prelude::*;

const SUBJECTS: [&str; 3] = ["math", "science", "history"];
const CHAPTERS: [&str; 2] = ["one", "two"];

fn build_card(i: usize, subject: usize, chapter: usize) -> Card {
    Card::new(
        CardId::new(format!("c{i}")),
        format!("Q{i}"),
        format!("A{i}"),
        SubjectId::new(SUBJECTS[subject]),
        ChapterId::new(format!("{}-{}", SUBJECTS[subject], CHAPTERS[chapter])),
    )
}

fn cards_strategy() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec((0..3usize, 0..2usize), 0..24).prop_map(|layout| {
        layout
            .into_iter()
            .enumerate()
            .map(|(i, (s, c))| build_card(i, s, c))
            .collect()
    })
}

fn selection_strategy() -> impl Strategy<Value = CardSelection> {
    (
        prop::option::of(0..3usize),
        prop::option::of(0..2usize),
        prop_oneof![
            Just(StrengthFilter::All),
            Just(StrengthFilter::Strong),
            Just(StrengthFilter::Weak)
        ],
    )
        .prop_map(|(subject, chapter, strength)| {
            let subject_id = subject.map(|s| SubjectId::new(SUBJECTS[s]));
            let chapter_id = match (subject, chapter) {
                (Some(s), Some(c)) => Some(ChapterId::new(format!("{}-{}", SUBJECTS[s], CHAPTERS[c]))),
                _ => None,
            };
            CardSelection {
                subject_id,
                chapter_id,
                strength,
            }
        })
}

fn strong_from_mask(cards: &[Card], mask: &[bool]) -> StrongTopics {
    cards
        .iter()
        .zip(mask.iter().cycle())
        .filter(|(_, strong)| **strong)
        .map(|(card, _)| card.id.clone())
        .collect()
}

fn is_ordered_subsequence(sub: &[Card], full: &[Card]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|card| it.any(|candidate| candidate == card))
}

proptest! {
    #[test]
    fn filter_output_is_ordered_subset_satisfying_selection(
        cards in cards_strategy(),
        selection in selection_strategy(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let strong = strong_from_mask(&cards, &mask);
        let out = filter_cards(&cards, &selection, &strong);
        prop_assert!(is_ordered_subsequence(&out, &cards));
        for card in &out {
            prop_assert!(selection.matches(card, &strong));
        }
        let kept = cards.iter().filter(|c| selection.matches(c, &strong)).count();
        prop_assert_eq!(out.len(), kept);
    }

    #[test]
    fn strength_all_equals_subject_chapter_filter(
        cards in cards_strategy(),
        selection in selection_strategy(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let strong = strong_from_mask(&cards, &mask);
        let all = selection.clone().with_strength(StrengthFilter::All);
        let out = filter_cards(&cards, &all, &strong);
        let expected = filter_cards(&cards, &all, &StrongTopics::new());
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn shuffle_is_a_permutation(items in prop::collection::vec(any::<u16>(), 0..64)) {
        let out = shuffled(&items);
        prop_assert_eq!(out.len(), items.len());
        let mut a = items.clone();
        let mut b = out.clone();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
        if items.len() <= 1 {
            prop_assert_eq!(out, items);
        }
    }

    #[test]
    fn score_counts_correct_answers_and_completes_after_n(
        answers in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let deck: Vec<Card> = (0..answers.len()).map(|i| build_card(i, 0, 0)).collect();
        let mut session = QuizSession::new(deck.clone(), QuizConfig::default());
        let mut strong = StrongTopics::new();
        session.start(fixed_now());

        for (i, correct) in answers.iter().enumerate() {
            prop_assert_eq!(session.phase(), QuizPhase::Running);
            let input = if *correct { deck[i].answer.clone() } else { "wrong".to_string() };
            session.submit_answer(&input, &mut strong, fixed_now());
            prop_assert!(session.score() <= session.results().len());
            prop_assert_eq!(strong.contains(&deck[i].id), *correct);
        }

        prop_assert_eq!(session.phase(), QuizPhase::Completed);
        let correct = answers.iter().filter(|c| **c).count();
        prop_assert_eq!(session.score(), correct);
        let flagged = session.results().iter().filter(|r| r.is_correct).count();
        prop_assert_eq!(session.score(), flagged);
    }

    #[test]
    fn matching_ignores_padding_and_case(word in "[a-zA-Z]{1,12}", left in " {0,3}", right in "[ \t]{0,3}") {
        let padded = format!("{left}{}{right}", word.to_uppercase());
        prop_assert!(answers_match(&padded, &word.to_lowercase()));
    }
}
