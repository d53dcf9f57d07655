//! Web application router and middleware setup.

use crate::client::SonarApi;
use crate::metrics::Collector;
use crate::web::config::{WebConfig, HEALTH_PATH};
use crate::web::handlers::{self, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the axum application serving metrics from the given collector.
pub fn create_app<A>(config: &WebConfig, collector: Collector<A>) -> Router
where
    A: SonarApi + Send + Sync + 'static,
{
    let state = Arc::new(AppState {
        collector,
        metrics_path: config.metrics_path.clone(),
    });

    // Paths the metrics route claims are not registered twice; see WebConfig::validate.
    let mut app = Router::new().route(&config.metrics_path, get(handlers::metrics::<A>));

    if config.metrics_path != HEALTH_PATH {
        app = app.route(HEALTH_PATH, get(handlers::health_check));
    }

    if config.metrics_path != "/" {
        app = app.route("/", get(handlers::index::<A>));
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
