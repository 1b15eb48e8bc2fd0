//! Plain-text rendering of core read models.

use std::io::{self, Write};

use flash_core::filter::CardSelection;
use flash_core::model::{Card, Library, find_subject};
use flash_core::quiz::{CompletionReason, QuizReport, QuizSnapshot};
use flash_core::study::StudySession;
use services::ProfileStats;

pub fn card_list(
    out: &mut impl Write,
    library: &Library,
    cards: &[Card],
    selection: &CardSelection,
) -> io::Result<()> {
    if cards.is_empty() {
        writeln!(out, "No flashcards found")?;
        return writeln!(out, "{}", selection.empty_hint());
    }
    for card in cards {
        writeln!(
            out,
            "[{}] {} / {}: {}",
            badge(library, card),
            subject_name(library, card),
            chapter_name(library, card),
            card.question
        )?;
    }
    writeln!(out, "{} card(s)", cards.len())
}

pub fn quiz_card(out: &mut impl Write, snapshot: &QuizSnapshot) -> io::Result<()> {
    let Some(question) = &snapshot.question else {
        return Ok(());
    };
    write!(
        out,
        "Card {} of {}  |  Score: {}",
        snapshot.position, snapshot.total, snapshot.score
    )?;
    if snapshot.timer_enabled {
        write!(out, "  |  {}s left", snapshot.time_remaining)?;
    }
    writeln!(out)?;
    writeln!(out, "Q: {question}")
}

pub fn quiz_report(out: &mut impl Write, report: &QuizReport) -> io::Result<()> {
    match report.reason {
        CompletionReason::DeckExhausted => writeln!(out, "Quiz completed!")?,
        CompletionReason::TimeUp => writeln!(out, "Time's up!")?,
    }
    writeln!(out, "{}", report.headline())?;
    writeln!(
        out,
        "Correct: {}  Incorrect: {}  Average time: {:.1}s",
        report.correct, report.incorrect, report.average_time
    )?;
    for result in &report.results {
        let mark = if result.is_correct { "✓" } else { "✗" };
        writeln!(out, "{mark} {}", result.question)?;
        writeln!(out, "    your answer: {}", result.user_input)?;
        if !result.is_correct {
            writeln!(out, "    correct answer: {}", result.answer)?;
        }
        writeln!(out, "    time: {:.1}s", result.time_spent_seconds)?;
    }
    Ok(())
}

pub fn study_card(
    out: &mut impl Write,
    library: &Library,
    study: &StudySession,
) -> io::Result<()> {
    let Some(card) = study.current() else {
        return writeln!(out, "No flashcards to study");
    };
    writeln!(
        out,
        "Card {} of {}  [{}]{}",
        study.position(),
        study.cards().len(),
        badge(library, card),
        if card.known { " known" } else { "" }
    )?;
    writeln!(out, "Q: {}", card.question)?;
    if study.showing_answer() {
        writeln!(out, "A: {}", card.answer)?;
    }
    Ok(())
}

pub fn profile(out: &mut impl Write, stats: &ProfileStats, total: usize) -> io::Result<()> {
    writeln!(out, "Total cards:   {total}")?;
    writeln!(out, "Strong topics: {}", stats.strong)?;
    writeln!(out, "Weak topics:   {}", stats.weak)?;
    if stats.answered > 0 {
        writeln!(
            out,
            "Last quiz: {} correct, {} incorrect, {:.1}s average",
            stats.correct, stats.incorrect, stats.average_time
        )?;
    }
    Ok(())
}

fn badge(library: &Library, card: &Card) -> &'static str {
    if library.strong_topics.contains(&card.id) {
        "strong"
    } else {
        "weak"
    }
}

fn subject_name<'a>(library: &'a Library, card: &'a Card) -> &'a str {
    find_subject(&library.subjects, &card.subject_id)
        .map_or(card.subject_id.as_str(), |subject| subject.name.as_str())
}

fn chapter_name<'a>(library: &'a Library, card: &'a Card) -> &'a str {
    find_subject(&library.subjects, &card.subject_id)
        .and_then(|subject| subject.chapter(&card.chapter_id))
        .map_or(card.chapter_id.as_str(), |chapter| chapter.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flash_core::defaults::default_library;
    use flash_core::filter::StrengthFilter;
    use flash_core::model::CardId;

    fn text(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn list_shows_names_and_badges() {
        let mut library = default_library();
        library.strong_topics.mark(&CardId::new("1"), true);
        let cards = library.cards[..2].to_vec();
        let out = text(|o| card_list(o, &library, &cards, &CardSelection::all()));
        assert!(out.contains("[strong] Mathematics / Geometry: What is the Pythagorean theorem?"));
        assert!(out.contains("[weak] Mathematics / Algebra"));
        assert!(out.ends_with("2 card(s)\n"));
    }

    #[test]
    fn empty_list_prints_hint() {
        let library = default_library();
        let selection = CardSelection::all().with_strength(StrengthFilter::Strong);
        let out = text(|o| card_list(o, &library, &[], &selection));
        assert!(out.contains("No strong topics found. Try a different filter."));
    }
}
