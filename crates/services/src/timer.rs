//! Host-side driver for the quiz countdown.

use std::time::Duration;

use flash_core::quiz::TickToken;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// One tick per second, matching the quiz countdown unit.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receiving end of a running ticker. Dropping it stops the task.
#[derive(Debug)]
pub struct Ticker {
    token: TickToken,
    rx: mpsc::Receiver<TickToken>,
    task: JoinHandle<()>,
}

impl Ticker {
    #[must_use]
    pub fn token(&self) -> TickToken {
        self.token
    }

    /// Wait for the next tick. `None` once the ticker is cancelled.
    pub async fn recv(&mut self) -> Option<TickToken> {
        self.rx.recv().await
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that sends `token` every `period`, starting one period from now.
///
/// The token carries the session generation it was issued for, so ticks that
/// arrive after a restart or toggle are rejected by the session.
#[must_use]
pub fn spawn_ticker(token: TickToken, period: Duration) -> Ticker {
    let (tx, rx) = mpsc::channel(1);
    let task = tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticks.tick().await;
        loop {
            ticks.tick().await;
            if tx.send(token).await.is_err() {
                break;
            }
        }
    });
    Ticker { token, rx, task }
}
