use std::net::SocketAddr;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use hyper::Server;
use tracing::{error, info};

use crate::error::Result;
use crate::gauges::LineGauges;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "aaisp-exporter",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Scrape endpoint. Serves whatever values the registry currently holds;
/// upstream trouble never surfaces here.
async fn metrics(Extension(gauges): Extension<LineGauges>) -> impl IntoResponse {
    match gauges.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Create the HTTP server with the exposition routes
pub fn create_server(gauges: LineGauges) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .layer(Extension(gauges))
}

/// Serve the exposition surface on the specified port until the process ends
pub async fn start_server(gauges: LineGauges, port: u16) -> Result<()> {
    let app = create_server(gauges);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "metrics available at /metrics");

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
