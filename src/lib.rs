//! Skycast - AI-assisted local weather briefing
//!
//! This library resolves the caller's approximate location from their
//! public IP, fetches a short-term weather forecast for it, and asks an
//! OpenAI-compatible inference gateway for a natural-language summary.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod location;
pub mod pipeline;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use analysis::AnalysisClient;
pub use config::AppConfig;
pub use error::SkycastError;
pub use location::{Coordinates, IpInfoClient, IpLocation};
pub use pipeline::{Briefing, Pipeline};
pub use weather::ForecastClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
