/// Default countdown length for a timed quiz.
pub const DEFAULT_TIMER_SECONDS: u32 = 60;

/// Quiz timer settings chosen before a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub timer_enabled: bool,
    pub timer_seconds: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            timer_seconds: DEFAULT_TIMER_SECONDS,
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn timed(seconds: u32) -> Self {
        Self {
            timer_enabled: true,
            timer_seconds: seconds,
        }
    }
}

/// Identifies which session generation a scheduled tick belongs to.
///
/// Hosts obtain a token from the running session, schedule ticks carrying it,
/// and feed them back. A token from a superseded generation is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Countdown {
    enabled: bool,
    duration: u32,
    remaining: u32,
}

impl Countdown {
    pub(crate) fn new(config: QuizConfig) -> Self {
        let duration = config.timer_seconds.max(1);
        Self {
            enabled: config.timer_enabled,
            duration,
            remaining: duration,
        }
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn remaining(&self) -> u32 {
        self.remaining
    }

    pub(crate) fn reset(&mut self) {
        self.remaining = self.duration;
    }

    pub(crate) fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// One tick. Returns the remaining seconds afterwards.
    pub(crate) fn decrement(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}
