//! Short-term forecast retrieval from OpenWeatherMap
//!
//! The forecast payload is treated as opaque JSON: it is handed to the
//! analysis step unmodified, so no schema is imposed on it here.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, instrument};

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Number of forecast intervals requested, always
pub const FORECAST_INTERVALS: u8 = 3;

/// Client for the OpenWeatherMap 5-day/3-hour forecast endpoint
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ForecastClient {
    /// Create a new forecast client
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the forecast for the given coordinates.
    ///
    /// Requests exactly [`FORECAST_INTERVALS`] intervals in metric
    /// units, regardless of location.
    #[instrument(skip(self))]
    pub async fn fetch(&self, latitude: &str, longitude: &str) -> Result<Value> {
        let url = format!(
            "{}/data/2.5/forecast?lat={}&lon={}&cnt={}&appid={}&units=metric",
            self.base_url, latitude, longitude, FORECAST_INTERVALS, self.api_key
        );
        debug!("Requesting forecast for ({}, {})", latitude, longitude);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| "Forecast request failed")?
            .error_for_status()
            .with_context(|| "Forecast service returned an error status")?;

        let payload: Value = response
            .json()
            .await
            .with_context(|| "Failed to parse forecast response")?;

        Ok(payload)
    }
}
