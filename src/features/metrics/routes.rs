use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::metrics::handlers;
use crate::features::metrics::services::MetricsService;

/// Create routes for the metrics feature (admin only, enforced by guards)
pub fn routes(service: Arc<MetricsService>) -> Router {
    Router::new()
        .route("/api/metrics/summary", get(handlers::get_summary))
        .route("/api/metrics/breakdowns", get(handlers::get_breakdowns))
        .with_state(service)
}
