//! Sequential briefing pipeline: location, then forecast, then summary
//!
//! Each step is awaited to completion before the next begins; the whole
//! run performs exactly three network calls in a fixed order.

use anyhow::Result;
use tracing::info;

use crate::analysis::AnalysisClient;
use crate::config::AppConfig;
use crate::location::{IpInfoClient, IpLocation};
use crate::weather::ForecastClient;

/// Result of a full pipeline run
#[derive(Debug)]
pub struct Briefing {
    /// Detected location the forecast was fetched for
    pub location: IpLocation,
    /// Natural-language summary, verbatim from the first completion choice
    pub summary: String,
}

/// The three service clients plus the configured prompt
pub struct Pipeline {
    ip: IpInfoClient,
    forecast: ForecastClient,
    analysis: AnalysisClient,
    prompt: String,
}

impl Pipeline {
    /// Build the pipeline against the production endpoints
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            ip: IpInfoClient::new(&config.ip_api_key)?,
            forecast: ForecastClient::new(&config.openweather_api_key)?,
            analysis: AnalysisClient::new(&config.inference_api_key)?,
            prompt: config.prompt.clone(),
        })
    }

    /// Build the pipeline against custom endpoints (used by tests)
    pub fn with_endpoints(
        config: &AppConfig,
        ip_base_url: &str,
        weather_base_url: &str,
        inference_base_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            ip: IpInfoClient::with_base_url(&config.ip_api_key, ip_base_url)?,
            forecast: ForecastClient::with_base_url(&config.openweather_api_key, weather_base_url)?,
            analysis: AnalysisClient::with_base_url(&config.inference_api_key, inference_base_url)?,
            prompt: config.prompt.clone(),
        })
    }

    /// Step 1: resolve the caller's approximate location.
    pub async fn detect_location(&self) -> Result<IpLocation> {
        let location = self.ip.locate().await?;
        info!("Detected IP {} near {}", location.ip, location.city);
        Ok(location)
    }

    /// Steps 2 and 3: fetch the forecast for the location and produce
    /// the summary.
    pub async fn summarize(&self, location: &IpLocation) -> Result<String> {
        let coordinates = location.coordinates()?;
        let payload = self
            .forecast
            .fetch(&coordinates.latitude, &coordinates.longitude)
            .await?;
        info!("Forecast retrieved, requesting analysis");
        self.analysis.analyze(&payload, &self.prompt).await
    }

    /// Run the whole pipeline: location, forecast, summary.
    pub async fn run(&self) -> Result<Briefing> {
        let location = self.detect_location().await?;
        let summary = self.summarize(&location).await?;
        Ok(Briefing { location, summary })
    }
}
