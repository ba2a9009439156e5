//! Server health polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::PollHandle;
use crate::client::ApiClient;
use crate::data::HealthLevel;
use crate::page::{self, Page, Region};

/// Health ticks never run more often than this.
const MIN_INTERVAL: Duration = Duration::from_secs(5);

/// Periodically fetches the health endpoint and reflects the status into
/// the page's health region as a text/class pair.
#[derive(Debug)]
pub struct HealthPoller {
    client: ApiClient,
    region: Arc<Region>,
    interval: Duration,
}

impl HealthPoller {
    /// Create a poller bound to the page's `healthStatus` region.
    ///
    /// Returns `None` when the page has no such region; without a place to
    /// render into, no poller (and later no task) is created at all.
    pub fn new(client: ApiClient, page: &Page, every: Duration) -> Option<Self> {
        let region = page.region(page::HEALTH_STATUS)?;
        Some(Self {
            client,
            region,
            interval: every.max(MIN_INTERVAL),
        })
    }

    /// The effective polling period after clamping.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one fetch-and-render cycle.
    ///
    /// Failures never surface here: the client already collapses them into
    /// the `unreachable` status, which classifies as bad.
    pub async fn refresh(&self) {
        let status = self.client.health_status().await;
        let level = HealthLevel::classify(&status);
        self.region.set_status(&status, level.css_class());
    }

    /// Start polling: one tick immediately, then one per interval.
    pub fn start(self) -> PollHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(self.interval);
            interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => self.refresh().await,
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        PollHandle { stop_tx }
    }
}
