//! wttr.in weather API client
//!
//! This module provides the weather provider used by the dashboard: a single
//! request for current conditions, a multi-day hourly forecast and astronomy
//! for the fixed station, parsed into a [`WeatherSnapshot`].

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::WeatherSnapshot;

/// Endpoint for the fixed station in wttr.in's JSON (`j1`) format
const WTTR_ENDPOINT: &str = "https://wttr.in/Gig+Harbor?format=j1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching weather data
///
/// The dashboard treats every variant the same way; the distinction only
/// shows up in the log.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed, timed out, or returned an error status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Source of weather snapshots.
///
/// Implementations must always complete in bounded time, successfully or
/// not, so the redraw cadence stays meaningful.
pub trait WeatherProvider {
    fn fetch(&self) -> impl Future<Output = Result<WeatherSnapshot, WeatherError>>;
}

/// Client for fetching weather data from wttr.in
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    endpoint: String,
}

impl WeatherClient {
    /// Create a new WeatherClient whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("harborwx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            endpoint: WTTR_ENDPOINT.to_string(),
        }
    }

    /// Fetch current conditions and forecast for the station
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - Parsed document
    /// * `Err(WeatherError)` - If the request, status, or parsing fails
    pub async fn fetch_snapshot(&self) -> Result<WeatherSnapshot, WeatherError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        debug!(bytes = text.len(), "weather document received");

        Ok(WeatherSnapshot::from_json(&text)?)
    }
}

impl WeatherProvider for WeatherClient {
    fn fetch(&self) -> impl Future<Output = Result<WeatherSnapshot, WeatherError>> {
        self.fetch_snapshot()
    }
}
