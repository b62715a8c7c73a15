//! HTTP API for the single-page web variant

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use tracing::error;

use crate::location::IpLocation;
use crate::pipeline::Pipeline;

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub summary: String,
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/location", get(get_location))
        .route("/analyze", post(analyze))
        .with_state(pipeline)
}

async fn get_location(
    State(pipeline): State<Arc<Pipeline>>,
) -> Result<Json<IpLocation>, StatusCode> {
    let location = pipeline.detect_location().await.map_err(|e| {
        error!("Location lookup failed: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(location))
}

async fn analyze(
    State(pipeline): State<Arc<Pipeline>>,
    Json(location): Json<IpLocation>,
) -> Result<Json<AnalysisResponse>, StatusCode> {
    let summary = pipeline.summarize(&location).await.map_err(|e| {
        error!("Analysis failed: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(AnalysisResponse { summary }))
}
