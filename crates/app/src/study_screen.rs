use std::error::Error;
use std::io::Write;

use flash_core::filter::CardSelection;
use flash_core::model::Library;
use flash_core::study::{StudyAction, StudyOutcome};
use services::StudyService;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render;

fn parse_action(line: &str) -> Option<StudyAction> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "f" | "flip" => Some(StudyAction::Flip),
        "k" | "know" => Some(StudyAction::Know),
        "d" | "dont" | "don't know" => Some(StudyAction::DontKnow),
        "s" | "strong" => Some(StudyAction::MarkStrong),
        "n" | "next" => Some(StudyAction::Next),
        "p" | "prev" | "previous" => Some(StudyAction::Previous),
        _ => None,
    }
}

/// Flip-card study over the cards matching `selection`, in collection order.
pub async fn run_study<R, W>(
    study: &StudyService,
    library: &mut Library,
    selection: &CardSelection,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = study.start(library, selection);
    if session.is_empty() {
        writeln!(out, "No flashcards found")?;
        writeln!(out, "{}", selection.empty_hint())?;
        return Ok(());
    }
    writeln!(
        out,
        "Study Mode: [f]lip, [k]now, [d]on't know, mark [s]trong, [n]ext, [p]revious, [q]uit"
    )?;
    render::study_card(out, library, &session)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let Some(action) = parse_action(trimmed) else {
            writeln!(out, "unknown command: {trimmed}")?;
            continue;
        };

        match study.apply(&mut session, library, action).await? {
            StudyOutcome::Assessed { known: true, .. } => writeln!(out, "Marked as known.")?,
            StudyOutcome::Assessed { known: false, .. } => writeln!(out, "Marked as not known.")?,
            StudyOutcome::MarkedStrong { changed: true, .. } => {
                writeln!(out, "Added to strong topics.")?;
            }
            StudyOutcome::MarkedStrong { changed: false, .. } => {
                writeln!(out, "Already a strong topic.")?;
            }
            StudyOutcome::Flipped { .. } | StudyOutcome::Moved { .. } | StudyOutcome::Empty => {}
        }
        render::study_card(out, library, &session)?;
    }
    Ok(())
}
