//! Wire types for the estation server.
//!
//! These types match the JSON served at `admin/live`: two optional lists,
//! the stations seen recently and their latest messages. Reading fields are
//! nullable on the wire since a station does not carry every sensor.

use serde::{Deserialize, Serialize};

/// A generic result row, as returned by the readings query API.
///
/// Key iteration order follows the order of appearance in the source
/// document; table column derivation relies on that.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// One live-feed response.
///
/// Either list may be absent entirely. An absent list means "no update for
/// that region", not "empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveFeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<Station>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<SensorMessage>>,
}

/// A station the server has heard from recently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub sensor_id: String,
    /// Timestamp of the station's most recent message, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

/// The most recent reading published by one station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorMessage {
    pub sensor_id: String,
    /// Server-side receive timestamp; nullable on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lux: Option<f64>,
}

/// Presentation class for a health status string.
///
/// The health endpoint returns free text; only the exact strings `OK` and
/// `DEGRADED` get special treatment, anything else counts as bad (including
/// the local `unreachable` fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    Ok,
    Warn,
    Bad,
}

impl HealthLevel {
    /// Classify a trimmed status string by exact match.
    pub fn classify(status: &str) -> Self {
        match status {
            "OK" => HealthLevel::Ok,
            "DEGRADED" => HealthLevel::Warn,
            _ => HealthLevel::Bad,
        }
    }

    /// Returns the region class used for display.
    pub fn css_class(&self) -> &'static str {
        match self {
            HealthLevel::Ok => "health-ok",
            HealthLevel::Warn => "health-warn",
            HealthLevel::Bad => "health-bad",
        }
    }
}
