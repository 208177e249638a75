//! Helpers shared by handler-level tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::core::config::AuthConfig;
use crate::core::middleware;
use crate::features::auth::models::Role;
use crate::features::auth::services::TokenService;

pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(AuthConfig {
        token_secret: "0123456789abcdef0123456789abcdef".to_string(),
        token_ttl: Duration::from_secs(3600),
    }))
}

/// Wrap a router in the session middleware, the way main() mounts the
/// protected route group.
pub fn with_session_auth(router: Router, tokens: Arc<TokenService>) -> Router {
    router.route_layer(axum::middleware::from_fn_with_state(
        tokens,
        middleware::auth_middleware,
    ))
}

/// Issue a bearer token for a test actor.
pub fn bearer_for(tokens: &TokenService, actor_id: &str, role: Role) -> String {
    let token = tokens.issue(actor_id, role, "SMT-2").unwrap();
    format!("Bearer {}", token)
}
