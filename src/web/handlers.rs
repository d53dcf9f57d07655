//! HTTP handlers for the exposition server.

use crate::client::SonarApi;
use crate::metrics::exposition::{self, CONTENT_TYPE};
use crate::metrics::Collector;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// State shared by every request.
pub struct AppState<A> {
    pub collector: Collector<A>,
    pub metrics_path: String,
}

/// Run one scrape and render it in the Prometheus text format.
pub async fn metrics<A>(State(state): State<Arc<AppState<A>>>) -> Response
where
    A: SonarApi + Send + Sync + 'static,
{
    let result = state.collector.scrape().await;

    match exposition::encode_text(&result, state.collector.descriptors()) {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Liveness endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "sonarqube-exporter",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Landing page pointing at the metrics path.
pub async fn index<A>(State(state): State<Arc<AppState<A>>>) -> Html<String>
where
    A: SonarApi + Send + Sync + 'static,
{
    Html(format!(
        "<html>\n<head><title>SonarQube Exporter</title></head>\n<body>\n\
         <h1>SonarQube Exporter</h1>\n<p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n</html>\n",
        path = state.metrics_path
    ))
}
