use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::tickets::handlers;
use crate::features::tickets::services::TicketService;

/// Routes behind session authentication. Role checks happen per handler.
pub fn routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route(
            "/api/tickets",
            post(handlers::submit_ticket).get(handlers::list_all_tickets),
        )
        .route("/api/tickets/mine", get(handlers::list_my_tickets))
        .route("/api/tickets/by-serial", get(handlers::search_by_serial))
        .route("/api/tickets/{position}", put(handlers::resolve_ticket))
        .route(
            "/api/tickets/{position}/notify",
            post(handlers::re_notify_ticket),
        )
        .with_state(service)
}

/// Anonymous status tracking, mounted outside the auth layer.
pub fn public_routes(service: Arc<TicketService>) -> Router {
    Router::new()
        .route("/api/track", get(handlers::track_tickets))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::models::Role;
    use crate::features::catalogs::CatalogService;
    use crate::features::tickets::models::TICKET_COLUMNS;
    use crate::modules::notify::testing::RecordingNotifier;
    use crate::modules::sheets::memory::MemorySheetStore;
    use crate::shared::constants::TICKETS_TABLE;
    use crate::shared::test_helpers::{bearer_for, test_token_service, with_session_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn pending_row(sn: &str, reporter: &str) -> Vec<String> {
        let mut row = vec![String::new(); TICKET_COLUMNS.len()];
        row[0] = "PCBA".to_string();
        row[1] = "W1".to_string();
        row[2] = sn.to_string();
        row[3] = "M1".to_string();
        row[7] = reporter.to_string();
        row[9] = "Pending".to_string();
        row[20] = "1".to_string();
        row
    }

    fn server() -> (TestServer, Arc<crate::features::auth::services::TokenService>) {
        let store = Arc::new(MemorySheetStore::new());
        store.seed(
            TICKETS_TABLE,
            &TICKET_COLUMNS,
            vec![pending_row("S1", "somchai"), pending_row("S2", "malee")],
        );
        let service = Arc::new(TicketService::new(
            store.clone(),
            Arc::new(CatalogService::new(store)),
            Arc::new(RecordingNotifier::new()),
        ));

        let tokens = test_token_service();
        let app = Router::new()
            .merge(with_session_auth(routes(service.clone()), tokens.clone()))
            .merge(public_routes(service));
        (TestServer::new(app).unwrap(), tokens)
    }

    #[tokio::test]
    async fn test_track_is_public() {
        let (server, _) = server();
        let response = server.get("/api/track").add_query_param("q", "S1").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_listing_requires_session() {
        let (server, _) = server();
        let response = server.get("/api/tickets").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_listing_requires_admin_role() {
        let (server, tokens) = server();
        let response = server
            .get("/api/tickets")
            .add_header("authorization", bearer_for(&tokens, "somchai", Role::Reporter))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_sees_all_tickets() {
        let (server, tokens) = server();
        let response = server
            .get("/api/tickets")
            .add_header("authorization", bearer_for(&tokens, "boss", Role::Admin))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reporter_sees_own_tickets_only() {
        let (server, tokens) = server();
        let response = server
            .get("/api/tickets/mine")
            .add_header("authorization", bearer_for(&tokens, "somchai", Role::Reporter))
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["serialNumber"], "S1");
    }
}
