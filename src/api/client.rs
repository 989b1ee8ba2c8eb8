//! Stats API Client Module
//! Blocking HTTP client for the spike statistics backend.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Aggregation window requested from the server, in seconds.
/// Fixed by the endpoint contract, not user-configurable.
pub const WINDOW_SECONDS: u32 = 60;

/// Upper bound on a single request so a hung server cannot
/// wedge the poll worker indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server returned HTTP {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Spike count for one neuron within the aggregation window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeuronCount {
    pub neuron_id: i64,
    pub count: u64,
    /// Mean spike amplitude over the window.
    #[serde(default)]
    pub avg_amp: f64,
}

/// One snapshot from `GET /stats`, ordered by neuron id server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub window_seconds: u32,
    pub total_spikes: u64,
    pub per_neuron: Vec<NeuronCount>,
}

/// Blocking client for the stats backend.
pub struct StatsClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl StatsClient {
    /// Create a client against the given base URL. Trailing slashes are
    /// trimmed so user-typed endpoints never produce `//stats` paths.
    pub fn with_url(base_url: String) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// URL of the stats endpoint this client polls.
    pub fn stats_url(&self) -> String {
        format!("{}/stats?window_seconds={}", self.base_url, WINDOW_SECONDS)
    }

    /// Fetch the latest spike-count snapshot.
    pub fn get_stats(&self) -> Result<StatsResponse, ApiError> {
        let response = self
            .client
            .get(self.stats_url())
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response.json().map_err(|e| ApiError::Parse(e.to_string()))
    }
}
