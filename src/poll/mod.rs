//! Cancellable polling tasks.
//!
//! Each poller owns one spawned task: an immediate first tick, then one tick
//! per interval, with a watch-channel stop signal. A tick runs to completion
//! before the loop selects again, so ticks of one poller never overlap; a
//! tick that outlasts the interval delays the next one instead of stacking.

mod health;
mod live;

pub use health::HealthPoller;
pub use live::LiveFeedPoller;

use tokio::sync::watch;

/// Handle for controlling a running poller.
///
/// Stop it explicitly with [`PollHandle::stop`], or drop it; either way
/// future ticks stop while an in-flight tick completes.
#[derive(Debug)]
pub struct PollHandle {
    stop_tx: watch::Sender<bool>,
}

impl PollHandle {
    /// Stop future ticks.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}
