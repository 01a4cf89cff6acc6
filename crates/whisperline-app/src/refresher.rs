//! Periodic lobby-listing refresh.
//!
//! While the player sits at the home screen the lobby list is re-requested
//! on a fixed interval. The timer is an explicit service with idempotent
//! start/cancel semantics: the runtime starts it on entering Home and
//! cancels it on leaving, and neither call can double-schedule or
//! double-cancel.

use std::time::Duration;

use tokio::{sync::mpsc, task::AbortHandle, time};

/// One refresh tick. The consumer decides whether the session is still in a
/// state where a re-listing makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTick;

/// Cancellable periodic refresh timer.
///
/// Owned by the presentation task; the spawned interval task only touches
/// its own channel sender.
#[derive(Debug)]
pub struct LobbyRefresher {
    interval: Duration,
    task: Option<AbortHandle>,
}

impl LobbyRefresher {
    /// Default refresh interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Timer with the default interval.
    pub fn new() -> Self {
        Self::with_interval(Self::DEFAULT_INTERVAL)
    }

    /// Timer with a custom interval (tests use short ones).
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval, task: None }
    }

    /// True while the interval task is scheduled.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start ticking. Idempotent: a second start keeps the existing task.
    ///
    /// The first tick fires one full interval after the call; the caller is
    /// expected to have just issued its own listing request on entering
    /// Home.
    pub fn start(&mut self, ticks: mpsc::Sender<RefreshTick>) {
        if self.task.is_some() {
            return;
        }

        let interval = self.interval;
        let handle = tokio::spawn(async move {
            let start = time::Instant::now() + interval;
            let mut timer = time::interval_at(start, interval);
            loop {
                timer.tick().await;
                if ticks.send(RefreshTick).await.is_err() {
                    // Consumer is gone; the timer has nothing left to do.
                    break;
                }
            }
        });
        self.task = Some(handle.abort_handle());
    }

    /// Stop ticking. Idempotent: cancelling a stopped timer is a no-op.
    ///
    /// After this returns, no further tick is ever delivered from the
    /// cancelled task.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Default for LobbyRefresher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LobbyRefresher {
    fn drop(&mut self) {
        self.cancel();
    }
}
