use crate::model::{Card, CardId};

use super::result::CompletionReason;
use super::session::QuizPhase;
use super::timer::TickToken;

/// User intents and timer ticks fed into a quiz session.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    /// Replace the prepared deck (selection changed). Not accepted while running.
    Prepare(Vec<Card>),
    Start,
    Submit(String),
    Tick(TickToken),
    Reshuffle,
    ToggleTimer,
    /// Abandon a running session (navigating away).
    Stop,
}

/// Why an intent had no effect. Informational, never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyDeck,
    WrongPhase(QuizPhase),
    StaleTick,
    TimerDisabled,
}

impl IgnoreReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            IgnoreReason::EmptyDeck => "No flashcards found for quiz",
            IgnoreReason::WrongPhase(QuizPhase::Idle) => "Press Start Quiz to begin",
            IgnoreReason::WrongPhase(QuizPhase::Running) => "A quiz is already in progress",
            IgnoreReason::WrongPhase(QuizPhase::Completed) => "Quiz completed!",
            IgnoreReason::StaleTick => "timer tick from a previous quiz",
            IgnoreReason::TimerDisabled => "timer is off",
        }
    }
}

/// Feedback for one submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub card_id: CardId,
    pub is_correct: bool,
    pub expected: String,
    pub score: usize,
    pub strong_changed: bool,
    pub completed: Option<CompletionReason>,
}

impl AnswerFeedback {
    #[must_use]
    pub fn message(&self) -> String {
        if self.is_correct {
            "Correct! You gained 1 point.".to_string()
        } else {
            format!("Incorrect. The correct answer was: {}", self.expected)
        }
    }
}

/// What applying an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizOutcome {
    Prepared { total: usize },
    Started { total: usize },
    Answered(AnswerFeedback),
    Ticked {
        remaining: u32,
        completed: Option<CompletionReason>,
    },
    Reshuffled { remaining: usize },
    TimerToggled { enabled: bool },
    Stopped,
    Ignored(IgnoreReason),
}

impl QuizOutcome {
    /// Set when this event moved the session into `Completed`.
    #[must_use]
    pub fn completion(&self) -> Option<CompletionReason> {
        match self {
            QuizOutcome::Answered(feedback) => feedback.completed,
            QuizOutcome::Ticked { completed, .. } => *completed,
            _ => None,
        }
    }

    /// True when the shared strong-topic set was modified.
    #[must_use]
    pub fn strong_topics_changed(&self) -> bool {
        matches!(self, QuizOutcome::Answered(feedback) if feedback.strong_changed)
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, QuizOutcome::Ignored(_))
    }
}
