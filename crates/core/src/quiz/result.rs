use crate::model::CardId;

/// Outcome of answering one card. Owned by a single quiz session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub card_id: CardId,
    pub question: String,
    pub answer: String,
    pub user_input: String,
    pub is_correct: bool,
    pub time_spent_seconds: f64,
}

/// Why a session reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    DeckExhausted,
    TimeUp,
}

/// Running counters for a session.
///
/// The average is updated incrementally as
/// `new_avg = (old_total + new_time) / (old_count + 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuizStats {
    answered: usize,
    correct: usize,
    total_time: f64,
    average_time: f64,
}

impl QuizStats {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn record(&mut self, is_correct: bool, time_spent: f64) {
        self.average_time = (self.total_time + time_spent) / (self.answered + 1) as f64;
        self.total_time += time_spent;
        self.answered += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.answered - self.correct
    }

    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    #[must_use]
    pub fn average_time(&self) -> f64 {
        self.average_time
    }
}

/// Final report for a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub reason: CompletionReason,
    pub score: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub average_time: f64,
    pub results: Vec<QuizResult>,
}

impl QuizReport {
    /// "Final Score: x / y" line.
    #[must_use]
    pub fn headline(&self) -> String {
        format!("Final Score: {} / {}", self.score, self.answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_mean_matches_plain_mean() {
        let mut stats = QuizStats::default();
        for (correct, time) in [(true, 2.0), (false, 4.0), (true, 6.0)] {
            stats.record(correct, time);
        }
        assert_eq!(stats.answered(), 3);
        assert_eq!(stats.correct(), 2);
        assert_eq!(stats.incorrect(), 1);
        assert!((stats.average_time() - 4.0).abs() < 1e-9);
        assert!((stats.total_time() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = QuizStats::default();
        assert_eq!(stats.answered(), 0);
        assert!(stats.average_time().abs() < f64::EPSILON);
    }
}
