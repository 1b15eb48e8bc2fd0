//! Typed-answer quiz: session state machine, scoring and countdown.

mod answer;
mod event;
mod result;
mod session;
mod timer;

pub use answer::{answers_match, normalize};
pub use event::{AnswerFeedback, IgnoreReason, QuizEvent, QuizOutcome};
pub use result::{CompletionReason, QuizReport, QuizResult, QuizStats};
pub use session::{QuizPhase, QuizSession, QuizSnapshot};
pub use timer::{DEFAULT_TIMER_SECONDS, QuizConfig, TickToken};
