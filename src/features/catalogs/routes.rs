use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::catalogs::handlers;
use crate::features::catalogs::services::CatalogService;

/// Create routes for the catalogs feature
///
/// Note: all catalog routes require authentication; replacement additionally
/// requires the admin role (enforced by guards).
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route(
            "/api/catalogs/models",
            get(handlers::get_model_catalog).put(handlers::replace_model_catalog),
        )
        .route("/api/catalogs/{name}/options", get(handlers::get_options))
        .route("/api/catalogs/{name}", put(handlers::replace_options))
        .with_state(service)
}
