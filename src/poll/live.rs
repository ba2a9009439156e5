//! Live-feed polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use super::PollHandle;
use crate::client::ApiClient;
use crate::page::{self, Page, Region};
use crate::render;

/// Live-feed ticks never run more often than this.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Periodically fetches the live feed and re-renders the stations and
/// messages regions.
///
/// A feed without one of the two lists leaves that region untouched, and a
/// failed tick leaves both regions exactly as they were; stale content
/// stays visible until a later tick succeeds.
#[derive(Debug)]
pub struct LiveFeedPoller {
    client: ApiClient,
    stations: Arc<Region>,
    messages: Arc<Region>,
    interval: Duration,
}

impl LiveFeedPoller {
    /// Create a poller bound to the page's `liveStations` and `liveMessages`
    /// regions.
    ///
    /// Returns `None` when either region is missing; the poller then never
    /// starts.
    pub fn new(client: ApiClient, page: &Page, every: Duration) -> Option<Self> {
        let stations = page.region(page::LIVE_STATIONS)?;
        let messages = page.region(page::LIVE_MESSAGES)?;
        Some(Self {
            client,
            stations,
            messages,
            interval: every.max(MIN_INTERVAL),
        })
    }

    /// The effective polling period after clamping.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one fetch-and-render cycle.
    pub async fn refresh(&self) {
        match self.client.live_feed().await {
            Ok(feed) => {
                if let Some(stations) = &feed.stations {
                    self.stations.set_html(render::stations_list(stations));
                }
                if let Some(messages) = &feed.messages {
                    self.messages.set_html(render::messages_table(messages));
                }
            }
            Err(err) => warn!("live feed tick failed: {err}"),
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::serve_once;
    use reqwest::Url;

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap())
    }

    const FEED: &str = r#"{
        "stations": [{"sensor_id": "esp32-01", "last_seen": "2024-05-01 12:33:19"}],
        "messages": [{"sensor_id": "esp32-01", "recorded_at": "2024-05-01 12:33:19",
                      "temp": 21.4, "humid": 40.0, "aqi": 42, "lux": 180.0}]
    }"#;

    #[tokio::test]
    async fn test_refresh_renders_both_regions() {
        let base = serve_once("200 OK", "application/json", FEED).await;
        let page = Page::admin();
        let poller = LiveFeedPoller::new(client_for(&base), &page, MIN_INTERVAL).unwrap();

        poller.refresh().await;

        let stations = page.region(page::LIVE_STATIONS).unwrap().html();
        assert!(stations.contains("esp32-01 — 2024-05-01 12:33:19"));
        let messages = page.region(page::LIVE_MESSAGES).unwrap().html();
        assert!(messages.contains("<td>21.4</td>"));
    }

    #[tokio::test]
    async fn test_absent_messages_field_leaves_region_untouched() {
        let base = serve_once("200 OK", "application/json", r#"{"stations": []}"#).await;
        let page = Page::admin();
        let messages = page.region(page::LIVE_MESSAGES).unwrap();
        messages.set_html("<p>previous</p>".to_string());

        let poller = LiveFeedPoller::new(client_for(&base), &page, MIN_INTERVAL).unwrap();
        poller.refresh().await;

        let stations = page.region(page::LIVE_STATIONS).unwrap().html();
        assert!(stations.contains("Sin estaciones"));
        assert_eq!(messages.html(), "<p>previous</p>");
    }

    #[tokio::test]
    async fn test_failed_tick_leaves_content_stale() {
        let page = Page::admin();
        let stations = page.region(page::LIVE_STATIONS).unwrap();
        let messages = page.region(page::LIVE_MESSAGES).unwrap();
        stations.set_html("<p>old stations</p>".to_string());
        messages.set_html("<p>old messages</p>".to_string());

        let poller =
            LiveFeedPoller::new(client_for("http://127.0.0.1:1/"), &page, MIN_INTERVAL).unwrap();
        poller.refresh().await;

        assert_eq!(stations.html(), "<p>old stations</p>");
        assert_eq!(messages.html(), "<p>old messages</p>");
    }

    #[tokio::test]
    async fn test_parse_failure_is_logged_only() {
        let base = serve_once("200 OK", "application/json", "not json at all").await;
        let page = Page::admin();
        let stations = page.region(page::LIVE_STATIONS).unwrap();
        stations.set_html("<p>stale</p>".to_string());

        let poller = LiveFeedPoller::new(client_for(&base), &page, MIN_INTERVAL).unwrap();
        poller.refresh().await;

        assert_eq!(stations.html(), "<p>stale</p>");
    }

    #[test]
    fn test_interval_clamped_to_minimum() {
        let page = Page::admin();
        let poller =
            LiveFeedPoller::new(client_for("http://127.0.0.1:1/"), &page, Duration::ZERO).unwrap();
        assert_eq!(poller.interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_both_regions_required() {
        let client = client_for("http://127.0.0.1:1/");

        let mut stations_only = Page::new();
        stations_only.add_region(page::LIVE_STATIONS, None);
        assert!(LiveFeedPoller::new(client.clone(), &stations_only, MIN_INTERVAL).is_none());

        let mut messages_only = Page::new();
        messages_only.add_region(page::LIVE_MESSAGES, None);
        assert!(LiveFeedPoller::new(client, &messages_only, MIN_INTERVAL).is_none());
    }

    #[tokio::test]
    async fn test_started_poller_ticks_immediately() {
        let base = serve_once("200 OK", "application/json", FEED).await;
        let page = Page::admin();
        let stations = page.region(page::LIVE_STATIONS).unwrap();
        let poller = LiveFeedPoller::new(client_for(&base), &page, MIN_INTERVAL).unwrap();

        let handle = poller.start();

        for _ in 0..100 {
            if !stations.html().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(stations.html().contains("esp32-01"));

        handle.stop();
    }
}
