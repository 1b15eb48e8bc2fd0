use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::model::{Card, StrongTopics};
use crate::shuffle::fisher_yates;
use crate::time::elapsed_seconds;

use super::answer::answers_match;
use super::event::{AnswerFeedback, IgnoreReason, QuizEvent, QuizOutcome};
use super::result::{CompletionReason, QuizReport, QuizResult, QuizStats};
use super::timer::{Countdown, QuizConfig, TickToken};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Running,
    Completed,
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    /// 1-based position of the current card.
    pub position: usize,
    pub total: usize,
    pub question: Option<String>,
    pub score: usize,
    pub answered: usize,
    pub timer_enabled: bool,
    pub time_remaining: u32,
    pub average_time: f64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Typed-answer quiz over a prepared deck.
///
/// Lifecycle: `Idle` → `Running` → `Completed`, restartable from `Completed`.
/// Invalid intents never fail; they come back as [`QuizOutcome::Ignored`].
pub struct QuizSession {
    deck: Vec<Card>,
    cursor: usize,
    results: Vec<QuizResult>,
    stats: QuizStats,
    countdown: Countdown,
    phase: QuizPhase,
    generation: u64,
    answer_baseline: Option<DateTime<Utc>>,
    completion: Option<CompletionReason>,
}

impl QuizSession {
    /// Create an idle session over an already filtered (and usually shuffled) deck.
    #[must_use]
    pub fn new(deck: Vec<Card>, config: QuizConfig) -> Self {
        Self {
            deck,
            cursor: 0,
            results: Vec::new(),
            stats: QuizStats::default(),
            countdown: Countdown::new(config),
            phase: QuizPhase::Idle,
            generation: 0,
            answer_baseline: None,
            completion: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Count of correct answers.
    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.correct()
    }

    #[must_use]
    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    #[must_use]
    pub fn stats(&self) -> QuizStats {
        self.stats
    }

    #[must_use]
    pub fn completion(&self) -> Option<CompletionReason> {
        self.completion
    }

    #[must_use]
    pub fn timer_enabled(&self) -> bool {
        self.countdown.enabled()
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        match self.phase {
            QuizPhase::Completed => None,
            QuizPhase::Idle | QuizPhase::Running => self.deck.get(self.cursor),
        }
    }

    /// Token for scheduling ticks, present only while a timed session runs.
    #[must_use]
    pub fn tick_token(&self) -> Option<TickToken> {
        (self.phase == QuizPhase::Running && self.countdown.enabled())
            .then(|| TickToken::new(self.generation))
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let current = self.current_card();
        QuizSnapshot {
            phase: self.phase,
            position: if current.is_some() { self.cursor + 1 } else { 0 },
            total: self.deck.len(),
            question: current.map(|card| card.question.clone()),
            score: self.score(),
            answered: self.results.len(),
            timer_enabled: self.countdown.enabled(),
            time_remaining: self.countdown.remaining(),
            average_time: self.stats.average_time(),
        }
    }

    /// Results report, available once the session is completed.
    #[must_use]
    pub fn report(&self) -> Option<QuizReport> {
        let reason = self.completion?;
        Some(QuizReport {
            reason,
            score: self.score(),
            answered: self.stats.answered(),
            correct: self.stats.correct(),
            incorrect: self.stats.incorrect(),
            average_time: self.stats.average_time(),
            results: self.results.clone(),
        })
    }

    /// Apply one event. The strong-topic set is only touched by `Submit`.
    pub fn apply_event(
        &mut self,
        event: QuizEvent,
        strong: &mut StrongTopics,
        now: DateTime<Utc>,
    ) -> QuizOutcome {
        match event {
            QuizEvent::Prepare(deck) => self.prepare(deck),
            QuizEvent::Start => self.start(now),
            QuizEvent::Submit(input) => self.submit_answer(&input, strong, now),
            QuizEvent::Tick(token) => self.tick(token),
            QuizEvent::Reshuffle => self.reshuffle_with(&mut rand::rng()),
            QuizEvent::ToggleTimer => self.toggle_timer(),
            QuizEvent::Stop => self.stop(),
        }
    }

    /// Replace the deck while no session is running. A completed session
    /// returns to `Idle` and drops its results.
    pub fn prepare(&mut self, deck: Vec<Card>) -> QuizOutcome {
        if self.phase == QuizPhase::Running {
            return QuizOutcome::Ignored(IgnoreReason::WrongPhase(self.phase));
        }
        self.deck = deck;
        self.cursor = 0;
        self.results.clear();
        self.stats = QuizStats::default();
        self.completion = None;
        self.phase = QuizPhase::Idle;
        QuizOutcome::Prepared {
            total: self.deck.len(),
        }
    }

    /// `Idle | Completed → Running`.
    pub fn start(&mut self, now: DateTime<Utc>) -> QuizOutcome {
        if self.phase == QuizPhase::Running {
            return QuizOutcome::Ignored(IgnoreReason::WrongPhase(self.phase));
        }
        if self.deck.is_empty() {
            return QuizOutcome::Ignored(IgnoreReason::EmptyDeck);
        }

        self.generation = self.generation.wrapping_add(1);
        self.cursor = 0;
        self.results.clear();
        self.stats = QuizStats::default();
        self.countdown.reset();
        self.completion = None;
        self.answer_baseline = Some(now);
        self.phase = QuizPhase::Running;

        QuizOutcome::Started {
            total: self.deck.len(),
        }
    }

    /// Score the typed answer for the current card and advance.
    ///
    /// Correct answers add the card to `strong`; incorrect answers remove it.
    pub fn submit_answer(
        &mut self,
        input: &str,
        strong: &mut StrongTopics,
        now: DateTime<Utc>,
    ) -> QuizOutcome {
        if self.phase != QuizPhase::Running {
            return QuizOutcome::Ignored(IgnoreReason::WrongPhase(self.phase));
        }
        let Some(card) = self.deck.get(self.cursor) else {
            return QuizOutcome::Ignored(IgnoreReason::EmptyDeck);
        };

        let time_spent = self
            .answer_baseline
            .map_or(0.0, |since| elapsed_seconds(since, now));
        let is_correct = answers_match(input, &card.answer);
        let strong_changed = strong.mark(&card.id, is_correct);

        let result = QuizResult {
            card_id: card.id.clone(),
            question: card.question.clone(),
            answer: card.answer.clone(),
            user_input: input.to_string(),
            is_correct,
            time_spent_seconds: time_spent,
        };
        let expected = result.answer.clone();
        let card_id = result.card_id.clone();
        self.results.push(result);
        self.stats.record(is_correct, time_spent);

        self.cursor += 1;
        let completed = if self.cursor >= self.deck.len() {
            self.complete(CompletionReason::DeckExhausted);
            Some(CompletionReason::DeckExhausted)
        } else {
            self.answer_baseline = Some(now);
            None
        };

        QuizOutcome::Answered(AnswerFeedback {
            card_id,
            is_correct,
            expected,
            score: self.score(),
            strong_changed,
            completed,
        })
    }

    /// One-second countdown step. Completes the session when time runs out;
    /// the unanswered card gets no result.
    pub fn tick(&mut self, token: TickToken) -> QuizOutcome {
        if token.generation() != self.generation {
            return QuizOutcome::Ignored(IgnoreReason::StaleTick);
        }
        if self.phase != QuizPhase::Running {
            return QuizOutcome::Ignored(IgnoreReason::WrongPhase(self.phase));
        }
        if !self.countdown.enabled() {
            return QuizOutcome::Ignored(IgnoreReason::TimerDisabled);
        }

        let remaining = self.countdown.decrement();
        let completed = (remaining == 0).then(|| {
            self.complete(CompletionReason::TimeUp);
            CompletionReason::TimeUp
        });
        QuizOutcome::Ticked {
            remaining,
            completed,
        }
    }

    /// Re-randomize the deck.
    ///
    /// Idle: the whole deck is shuffled. Running: only the unanswered remainder
    /// is shuffled; the cursor and recorded results stay as they are.
    pub fn reshuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QuizOutcome {
        if self.deck.is_empty() {
            return QuizOutcome::Ignored(IgnoreReason::EmptyDeck);
        }
        match self.phase {
            QuizPhase::Idle => {
                fisher_yates(&mut self.deck, rng);
                self.cursor = 0;
            }
            QuizPhase::Running => fisher_yates(&mut self.deck[self.cursor..], rng),
            QuizPhase::Completed => {
                return QuizOutcome::Ignored(IgnoreReason::WrongPhase(self.phase));
            }
        }
        QuizOutcome::Reshuffled {
            remaining: self.deck.len() - self.cursor,
        }
    }

    /// Turn the countdown on or off. While running this pauses/resumes it and
    /// invalidates any outstanding ticks.
    pub fn toggle_timer(&mut self) -> QuizOutcome {
        let enabled = self.countdown.toggle();
        if self.phase == QuizPhase::Running {
            self.generation = self.generation.wrapping_add(1);
        }
        QuizOutcome::TimerToggled { enabled }
    }

    /// `Running → Idle`, discarding progress.
    pub fn stop(&mut self) -> QuizOutcome {
        if self.phase != QuizPhase::Running {
            return QuizOutcome::Ignored(IgnoreReason::WrongPhase(self.phase));
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = QuizPhase::Idle;
        self.cursor = 0;
        self.results.clear();
        self.stats = QuizStats::default();
        self.answer_baseline = None;
        QuizOutcome::Stopped
    }

    fn complete(&mut self, reason: CompletionReason) {
        self.phase = QuizPhase::Completed;
        self.completion = Some(reason);
        self.answer_baseline = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("deck_len", &self.deck.len())
            .field("cursor", &self.cursor)
            .field("results_len", &self.results.len())
            .field("generation", &self.generation)
            .field("time_remaining", &self.countdown.remaining())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
