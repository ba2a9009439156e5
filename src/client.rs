//! HTTP client for the estation server.
//!
//! One thin wrapper over `reqwest`: relative endpoint paths are joined onto
//! the configured base URL (so a server deployed under a context path keeps
//! working), and non-success responses are normalized into a typed error
//! carrying the response body text.

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::data::{LiveFeed, Record};
use crate::validate::is_strict_timestamp;

const HEALTH_PATH: &str = "Health";
const LIVE_PATH: &str = "admin/live";
const READINGS_QUERY_PATH: &str = "api/readings/query";

/// Errors from the fetch wrapper.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a non-success status. `message` carries the
    /// response body text, or the status reason when the body is empty.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// The request never produced a usable response (connect, timeout,
    /// body decode).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The base URL cannot be combined with an endpoint path.
    #[error("invalid server url: {0}")]
    BadUrl(String),

    /// Rejected before sending: a query timestamp is not in the strict
    /// format.
    #[error("invalid {field} timestamp {value:?}: expected yyyy-MM-ddHH:mm:ss")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Parameters for the readings query API.
///
/// Everything is optional; the server applies its own column and operator
/// whitelists and clamps `limit` to 200.
#[derive(Debug, Clone, Default)]
pub struct ReadingsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub filter: Option<String>,
    pub value: Option<String>,
    pub op: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ReadingsQuery {
    fn validate(&self) -> Result<(), RequestError> {
        for (field, value) in [("start", &self.start), ("end", &self.end)] {
            if let Some(ts) = value {
                if !is_strict_timestamp(ts) {
                    return Err(RequestError::InvalidTimestamp {
                        field,
                        value: ts.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Wire parameter pairs, using the server's camelCase names.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let text_fields = [
            ("start", &self.start),
            ("end", &self.end),
            ("filter", &self.filter),
            ("value", &self.value),
            ("op", &self.op),
            ("sortBy", &self.sort_by),
            ("order", &self.order),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                params.push((name, value.clone()));
            }
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

/// Typed fetch wrapper bound to one server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the given base URL. A missing trailing slash is
    /// added so relative endpoint paths join under the full base path.
    pub fn new(base: Url) -> Self {
        let mut base = base;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            http: Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base
            .join(path)
            .map_err(|_| RequestError::BadUrl(format!("{} + {path}", self.base)))
    }

    /// GET a relative path and parse the response body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self.http.get(self.endpoint(path)?).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// GET a relative path and return the response body text.
    pub async fn get_text(&self, path: &str) -> Result<String, RequestError> {
        let response = self.http.get(self.endpoint(path)?).send().await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    /// Current server health as display text.
    ///
    /// Any failure (transport or non-success status) collapses to the
    /// literal `unreachable`; success yields the trimmed body.
    pub async fn health_status(&self) -> String {
        match self.get_text(HEALTH_PATH).await {
            Ok(body) => body.trim().to_string(),
            Err(err) => {
                debug!("health fetch failed: {err}");
                "unreachable".to_string()
            }
        }
    }

    /// Fetch the live feed.
    pub async fn live_feed(&self) -> Result<LiveFeed, RequestError> {
        self.get_json(LIVE_PATH).await
    }

    /// Run a readings query.
    ///
    /// `start`/`end` are validated against the strict timestamp format
    /// first; nothing goes on the wire when they fail.
    pub async fn query_readings(&self, query: &ReadingsQuery) -> Result<Vec<Record>, RequestError> {
        query.validate()?;
        let response = self
            .http
            .get(self.endpoint(READINGS_QUERY_PATH)?)
            .query(&query.params())
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Pass a success response through; turn anything else into
/// [`RequestError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body
    };
    Err(RequestError::Status { status, message })
}
