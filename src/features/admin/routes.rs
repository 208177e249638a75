use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for the admin feature (admin only, enforced by guards)
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/api/admin/users",
            get(handlers::list_users).put(handlers::replace_users),
        )
        .with_state(service)
}
