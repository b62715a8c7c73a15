//! Web shell: serves the single-page form and the `/api` routes

use std::sync::Arc;

use axum::{Router, response::Html, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::pipeline::Pipeline;

const INDEX_HTML: &str = include_str!("web/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn app(pipeline: Pipeline) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .nest("/api", api::router(Arc::new(pipeline)))
        .layer(cors)
}

pub async fn run(pipeline: Pipeline, port: u16) {
    let app = app(pipeline);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
