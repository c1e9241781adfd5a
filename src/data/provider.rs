//! Station data provider
//!
//! Fetching is split in two stages: [`StationClient::attempt_fetch`] talks to
//! the station API and reports failures as [`FetchError`], then [`reconcile`]
//! turns that result into the list the dashboard shows. `reconcile` is the
//! only place that falls back to synthetic data, so callers of
//! [`StationProvider::get_stations`] never see an error.

use std::collections::HashSet;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::mock::generate_mock_stations;
use super::StationSnapshot;

/// Default station collection endpoint
pub const DEFAULT_ENDPOINT: &str = "https://weatherstations.nmsu.edu/api/weatherstations";

/// Default HTTP timeout for the station request
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when fetching station data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API request failed with status {0}")]
    Status(StatusCode),

    /// Response body was not a station list
    #[error("Failed to parse station payload: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Response parsed but cannot be displayed
    #[error("Invalid station payload: {0}")]
    InvalidPayload(String),
}

/// What to do with a successful response from the station API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LivePolicy {
    /// Drop the response body and serve synthetic data
    #[default]
    #[serde(alias = "demo")]
    Discard,
    /// Parse the response body and serve it when valid
    #[serde(alias = "live")]
    Use,
}

impl LivePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LivePolicy::Discard => "discard",
            LivePolicy::Use => "use",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "discard" | "demo" => Some(LivePolicy::Discard),
            "use" | "live" => Some(LivePolicy::Use),
            _ => None,
        }
    }
}

/// Raw body of a successful station API response
#[derive(Debug, Clone)]
pub struct Payload {
    pub body: String,
}

/// Source of station snapshots for the dashboard
#[async_trait]
pub trait StationProvider: Send + Sync + Debug {
    /// Returns the current snapshot list; never fails and never returns an
    /// empty list.
    async fn get_stations(&self) -> Vec<StationSnapshot>;
}

/// Client for the ZiaMet station API
#[derive(Debug, Clone)]
pub struct StationClient {
    client: Client,
    endpoint: String,
    policy: LivePolicy,
}

impl Default for StationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StationClient {
    /// Creates a client for the default endpoint that discards live data
    pub fn new() -> Self {
        Self {
            client: build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            policy: LivePolicy::default(),
        }
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            ..Self::new()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_policy(mut self, policy: LivePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn policy(&self) -> LivePolicy {
        self.policy
    }

    /// Issues one GET to the station endpoint
    ///
    /// # Returns
    /// * `Ok(Payload)` - the body of a 2xx response
    /// * `Err(FetchError)` - transport failure or non-success status
    pub async fn attempt_fetch(&self) -> Result<Payload, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "Requesting station data");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(Payload { body })
    }
}

#[async_trait]
impl StationProvider for StationClient {
    async fn get_stations(&self) -> Vec<StationSnapshot> {
        let result = self.attempt_fetch().await;
        reconcile(result, self.policy)
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to configure HTTP client, using defaults");
            Client::new()
        })
}

/// Turns a fetch result into the list the dashboard displays
///
/// Failures of any kind are logged and replaced with synthetic stations.
/// Under [`LivePolicy::Discard`] a successful response is dropped as well.
pub fn reconcile(result: Result<Payload, FetchError>, policy: LivePolicy) -> Vec<StationSnapshot> {
    let live = result.and_then(|payload| match policy {
        LivePolicy::Discard => {
            tracing::info!(
                bytes = payload.body.len(),
                "Station API responded, serving synthetic data"
            );
            Ok(None)
        }
        LivePolicy::Use => parse_payload(&payload).map(Some),
    });

    match live {
        Ok(Some(stations)) => {
            tracing::info!(count = stations.len(), "Serving live station data");
            stations
        }
        Ok(None) => generate_mock_stations(),
        Err(err) => {
            tracing::warn!(error = %err, "Falling back to synthetic station data");
            generate_mock_stations()
        }
    }
}

/// Parses and validates a station list from a response body
fn parse_payload(payload: &Payload) -> Result<Vec<StationSnapshot>, FetchError> {
    let stations: Vec<StationSnapshot> = serde_json::from_str(&payload.body)?;

    if stations.is_empty() {
        return Err(FetchError::InvalidPayload("no stations".to_string()));
    }

    let mut seen = HashSet::with_capacity(stations.len());
    for station in &stations {
        if !seen.insert(station.id.as_str()) {
            return Err(FetchError::InvalidPayload(format!(
                "duplicate station id '{}'",
                station.id
            )));
        }
        if station.trends.is_empty() {
            return Err(FetchError::InvalidPayload(format!(
                "station '{}' has no trend data",
                station.id
            )));
        }
    }

    Ok(stations)
}
