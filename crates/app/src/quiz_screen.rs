use std::error::Error;
use std::io::Write;

use flash_core::filter::CardSelection;
use flash_core::model::Library;
use flash_core::quiz::{
    IgnoreReason, QuizConfig, QuizEvent, QuizOutcome, QuizPhase, QuizSession, TickToken,
};
use services::{QuizLoopService, TICK_PERIOD, Ticker, spawn_ticker};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render;

/// A line typed at the quiz prompt.
#[derive(Debug, Clone, PartialEq)]
enum QuizInput {
    Event(QuizEvent),
    Help,
    Quit,
    Nothing,
}

fn parse_input(line: &str, phase: QuizPhase) -> QuizInput {
    match line.trim() {
        ":q" | ":quit" => QuizInput::Quit,
        ":h" | ":help" => QuizInput::Help,
        ":start" => QuizInput::Event(QuizEvent::Start),
        ":shuffle" => QuizInput::Event(QuizEvent::Reshuffle),
        ":timer" => QuizInput::Event(QuizEvent::ToggleTimer),
        ":stop" => QuizInput::Event(QuizEvent::Stop),
        "" if phase != QuizPhase::Running => QuizInput::Event(QuizEvent::Start),
        "" => QuizInput::Nothing,
        _ if phase == QuizPhase::Running => {
            QuizInput::Event(QuizEvent::Submit(line.to_string()))
        }
        _ => QuizInput::Nothing,
    }
}

fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Type your answer and press enter.")?;
    writeln!(out, "  :start    start (or restart) the quiz")?;
    writeln!(out, "  :shuffle  reshuffle the remaining cards")?;
    writeln!(out, "  :timer    turn the countdown on or off")?;
    writeln!(out, "  :stop     abandon the running quiz")?;
    writeln!(out, "  :quit     leave")
}

async fn next_tick(ticker: &mut Option<Ticker>) -> Option<TickToken> {
    match ticker {
        Some(ticker) => ticker.recv().await,
        None => std::future::pending().await,
    }
}

/// Keep exactly one ticker alive for the session's current token.
fn sync_ticker(ticker: &mut Option<Ticker>, wanted: Option<TickToken>) {
    if ticker.as_ref().map(Ticker::token) != wanted {
        *ticker = wanted.map(|token| spawn_ticker(token, TICK_PERIOD));
    }
}

/// Interactive typed-answer quiz over the cards matching `selection`.
pub async fn run_quiz<R, W>(
    quiz: &QuizLoopService,
    library: &mut Library,
    selection: &CardSelection,
    config: QuizConfig,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = quiz.prepare_session(library, selection, config);
    if session.deck().is_empty() {
        writeln!(out, "{}", IgnoreReason::EmptyDeck.message())?;
        writeln!(out, "{}", selection.empty_hint())?;
        return Ok(());
    }
    writeln!(
        out,
        "Quiz Mode: {} card(s). Press enter or type :start to begin, :help for commands.",
        session.deck().len()
    )?;

    let mut lines = input.lines();
    let mut ticker: Option<Ticker> = None;
    loop {
        let event = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line, session.phase()) {
                    QuizInput::Event(event) => event,
                    QuizInput::Help => {
                        print_help(out)?;
                        continue;
                    }
                    QuizInput::Quit => break,
                    QuizInput::Nothing => continue,
                }
            }
            Some(token) = next_tick(&mut ticker) => QuizEvent::Tick(token),
        };

        let outcome = quiz.apply(&mut session, library, event).await?;
        render_outcome(out, &session, &outcome)?;
        sync_ticker(&mut ticker, session.tick_token());
    }

    let stats = quiz.profile_stats(library, &session);
    render::profile(out, &stats, library.cards.len())?;
    Ok(())
}

fn render_outcome(
    out: &mut impl Write,
    session: &QuizSession,
    outcome: &QuizOutcome,
) -> std::io::Result<()> {
    match outcome {
        QuizOutcome::Started { total } => {
            writeln!(out, "Quiz started with {total} card(s).")?;
        }
        QuizOutcome::Answered(feedback) => writeln!(out, "{}", feedback.message())?,
        QuizOutcome::Ticked {
            remaining,
            completed: None,
        } => {
            if *remaining <= 5 || remaining % 10 == 0 {
                writeln!(out, "{remaining}s left")?;
            }
            return Ok(());
        }
        QuizOutcome::Ticked { .. } => {}
        QuizOutcome::Reshuffled { remaining } => {
            writeln!(out, "Reshuffled {remaining} card(s).")?;
        }
        QuizOutcome::TimerToggled { enabled } => {
            writeln!(out, "Timer {}.", if *enabled { "on" } else { "off" })?;
        }
        QuizOutcome::Stopped => {
            writeln!(out, "Quiz stopped. Press enter to start again.")?;
            return Ok(());
        }
        QuizOutcome::Prepared { total } => writeln!(out, "{total} card(s) ready.")?,
        QuizOutcome::Ignored(IgnoreReason::StaleTick) => return Ok(()),
        QuizOutcome::Ignored(reason) => {
            writeln!(out, "{}", reason.message())?;
            return Ok(());
        }
    }

    if outcome.completion().is_some() {
        if let Some(report) = session.report() {
            render::quiz_report(out, &report)?;
        }
        return writeln!(out, "Press enter to try again, :quit to leave.");
    }
    if session.phase() == QuizPhase::Running {
        render::quiz_card(out, &session.snapshot())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flash_core::model::{Card, CardId, ChapterId, StrongTopics, SubjectId};
    use flash_core::time::fixed_now;
    use services::{AppServices, Clock};

    fn library_with_same_answer(n: usize) -> Library {
        let cards = (0..n)
            .map(|i| {
                Card::new(
                    CardId::new(format!("c{i}")),
                    format!("{i} + {}", 4 - i),
                    "4",
                    SubjectId::new("math"),
                    ChapterId::new("algebra"),
                )
            })
            .collect();
        Library::new(cards, Vec::new(), StrongTopics::new())
    }

    #[test]
    fn input_parsing_depends_on_phase() {
        assert_eq!(
            parse_input("", QuizPhase::Idle),
            QuizInput::Event(QuizEvent::Start)
        );
        assert_eq!(parse_input("", QuizPhase::Running), QuizInput::Nothing);
        assert_eq!(
            parse_input(" Paris ", QuizPhase::Running),
            QuizInput::Event(QuizEvent::Submit(" Paris ".into()))
        );
        assert_eq!(parse_input("Paris", QuizPhase::Completed), QuizInput::Nothing);
        assert_eq!(parse_input(":quit", QuizPhase::Running), QuizInput::Quit);
    }

    #[tokio::test]
    async fn scripted_quiz_reports_final_score() {
        let services = AppServices::in_memory(Clock::fixed(fixed_now()));
        let quiz = services.quiz_loop();
        let mut library = library_with_same_answer(2);
        let input: &[u8] = b":start\n4\n FOUR \n:quit\n";
        let mut out = Vec::new();

        run_quiz(
            &quiz,
            &mut library,
            &CardSelection::all(),
            QuizConfig::default(),
            input,
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Correct! You gained 1 point."));
        assert!(text.contains("Incorrect. The correct answer was: 4"));
        assert!(text.contains("Final Score: 1 / 2"));
        assert_eq!(library.strong_topics.len(), 1);
    }

    #[tokio::test]
    async fn empty_selection_prints_hint() {
        let services = AppServices::in_memory(Clock::fixed(fixed_now()));
        let mut library = library_with_same_answer(0);
        let mut out = Vec::new();

        run_quiz(
            &services.quiz_loop(),
            &mut library,
            &CardSelection::all(),
            QuizConfig::default(),
            &b""[..],
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No flashcards found for quiz"));
        assert!(text.contains("Create your first flashcard to get started"));
    }
}
