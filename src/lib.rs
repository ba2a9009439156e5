//! # stationwatch
//!
//! A headless admin console for estation sensor-station servers.
//!
//! An estation server exposes a plaintext health endpoint, a JSON live feed
//! of stations and their latest readings, and a readings query API. This
//! crate polls those endpoints and mirrors the admin console page to a
//! local HTML document; the same pieces work as a library for building
//! other console frontends.
//!
//! ## Architecture
//!
//! ```text
//!             estation server
//!    Health · admin/live · api/readings/query
//!                   │  HTTP (client)
//!                   ▼
//!         ┌───────────────────┐
//!         │    poll (ticks)   │  HealthPoller / LiveFeedPoller
//!         └─────────┬─────────┘
//!                   │  fragments (render ◀ data)
//!                   ▼
//!         ┌───────────────────┐
//!         │   page (regions)  │  healthStatus / liveStations / liveMessages
//!         └─────────┬─────────┘
//!                   │  page.document()
//!                   ▼
//!            mirrored HTML file
//! ```
//!
//! - **[`client`]**: typed fetch wrapper ([`ApiClient`]); relative endpoint
//!   paths on one base URL, non-success responses normalized into
//!   [`RequestError`] with the body text
//! - **[`data`]**: wire types for the live feed and query rows
//! - **[`render`]**: pure HTML fragment renderers, one escaping path for all
//!   dynamic content
//! - **[`page`]**: the region model standing in for the console page, plus
//!   full-document rendering
//! - **[`poll`]**: cancellable polling tasks with clamped intervals and
//!   serialized ticks
//! - **[`validate`]**: the strict `yyyy-MM-ddHH:mm:ss` timestamp check
//! - **[`config`]**: layered settings for the binary
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Mirror the admin console of a local server
//! stationwatch --server http://127.0.0.1:8080/ --out console.html
//!
//! # One readings query, table fragment on stdout
//! stationwatch --query --start 2024-01-0100:00:00 --sensor esp32-01
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use reqwest::Url;
//! use stationwatch::poll::{HealthPoller, LiveFeedPoller};
//! use stationwatch::{ApiClient, Page};
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::new(Url::parse("http://127.0.0.1:8080/").unwrap());
//! let page = Page::admin();
//!
//! let health = HealthPoller::new(client.clone(), &page, Duration::from_secs(30)).unwrap();
//! let live = LiveFeedPoller::new(client, &page, Duration::from_secs(5)).unwrap();
//! let health_handle = health.start();
//! let live_handle = live.start();
//!
//! // ... page.document("console") gives the current page at any point ...
//!
//! health_handle.stop();
//! live_handle.stop();
//! # });
//! ```
//!
//! ### Rendering a table fragment
//!
//! ```
//! use stationwatch::data::Record;
//! use stationwatch::render;
//!
//! let rows: Vec<Record> =
//!     serde_json::from_str(r#"[{"sensor_id": "esp32-01", "temp": 21.4}]"#).unwrap();
//! assert!(render::records_table(&rows).contains("<th>sensor_id</th>"));
//! ```

pub mod client;
pub mod config;
pub mod data;
pub mod page;
pub mod poll;
pub mod render;
pub mod validate;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use client::{ApiClient, ReadingsQuery, RequestError};
pub use data::{HealthLevel, LiveFeed, Record, SensorMessage, Station};
pub use page::{Page, Region, RegionSnapshot};
pub use poll::{HealthPoller, LiveFeedPoller, PollHandle};
pub use validate::is_strict_timestamp;
