//! Location resolution via IP geolocation
//!
//! One GET against ipinfo.io maps the caller's public IP to an
//! approximate city and a "lat,lon" coordinate string.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::SkycastError;

const IPINFO_BASE_URL: &str = "https://ipinfo.io";

/// Geolocation response for the caller's public IP.
///
/// Also serialized back out by the web API, so the page can hand the
/// detected location to the analyze endpoint unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLocation {
    /// Detected public IP address
    pub ip: String,
    /// Approximate city name
    pub city: String,
    /// Coordinates as a "lat,lon" string
    pub loc: String,
}

impl IpLocation {
    /// Parse the `loc` field into coordinate strings
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::parse(&self.loc)
    }
}

/// Latitude/longitude pair, kept as strings the way the upstream
/// services exchange them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    /// Split a "lat,lon" string on its first comma.
    ///
    /// No numeric validation is performed; a string without a comma is
    /// rejected.
    pub fn parse(loc: &str) -> Result<Self> {
        let (latitude, longitude) = loc
            .split_once(',')
            .ok_or_else(|| SkycastError::validation(format!("malformed coordinates: {loc}")))?;

        Ok(Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        })
    }
}

/// Client for the ipinfo.io geolocation service
pub struct IpInfoClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl IpInfoClient {
    /// Create a new geolocation client
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, IPINFO_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Look up the caller's approximate location.
    #[instrument(skip(self))]
    pub async fn locate(&self) -> Result<IpLocation> {
        let url = format!("{}/json?token={}", self.base_url, self.token);
        debug!("Requesting IP geolocation");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| "Geolocation request failed")?
            .error_for_status()
            .with_context(|| "Geolocation service returned an error status")?;

        let location: IpLocation = response
            .json()
            .await
            .with_context(|| "Failed to parse geolocation response")?;

        debug!("Detected IP {} in {}", location.ip, location.city);
        Ok(location)
    }
}
