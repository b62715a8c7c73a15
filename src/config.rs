//! Configuration management for the Skycast application
//!
//! All configuration comes from environment variables. Every value is
//! required; a missing value yields a `SkycastError::Config` naming it.

use std::env;

use crate::error::SkycastError;

/// Weather-service API key variable
pub const OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";
/// IP-geolocation token variable
pub const IP_API_KEY: &str = "IP_API_KEY";
/// Inference-gateway key variable
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Prompt template variable
pub const AI_PROMPT: &str = "AI_PROMPT";

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap API key
    pub openweather_api_key: String,
    /// ipinfo.io access token
    pub ip_api_key: String,
    /// Key for the OpenAI-compatible inference gateway
    pub inference_api_key: String,
    /// User-supplied prompt the forecast JSON is appended to
    pub prompt: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables are checked in a fixed order so the first missing one
    /// is the one reported.
    pub fn from_env() -> Result<Self, SkycastError> {
        let openweather_api_key = require(
            OPENWEATHER_API_KEY,
            "Error: OpenWeather API key not found.",
        )?;
        let ip_api_key = require(IP_API_KEY, "Error: IP API key not found.")?;
        let inference_api_key = require(
            OPENAI_API_KEY,
            "Error: OpenAI or compatible API key not found.",
        )?;
        let prompt = require(AI_PROMPT, "Error: analysis prompt not found.")?;

        Ok(Self {
            openweather_api_key,
            ip_api_key,
            inference_api_key,
            prompt,
        })
    }
}

fn require(var: &str, message: &str) -> Result<String, SkycastError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => {
            tracing::debug!("Required environment variable {} is not set", var);
            Err(SkycastError::config(message))
        }
    }
}
