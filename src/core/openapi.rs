use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth;
use crate::features::catalogs::{dtos as catalogs_dtos, handlers as catalogs_handlers};
use crate::features::metrics::{dtos as metrics_dtos, handlers as metrics_handlers};
use crate::features::tickets::{
    dtos as tickets_dtos, handlers as tickets_handlers, models as tickets_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        // Tickets
        tickets_handlers::submit_ticket,
        tickets_handlers::resolve_ticket,
        tickets_handlers::re_notify_ticket,
        tickets_handlers::list_my_tickets,
        tickets_handlers::search_by_serial,
        tickets_handlers::list_all_tickets,
        tickets_handlers::track_tickets,
        // Catalogs
        catalogs_handlers::get_options,
        catalogs_handlers::get_model_catalog,
        catalogs_handlers::replace_options,
        catalogs_handlers::replace_model_catalog,
        // Metrics (admin)
        metrics_handlers::get_summary,
        metrics_handlers::get_breakdowns,
        // Admin
        admin_handlers::list_users,
        admin_handlers::replace_users,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::models::Role,
            auth::dtos::LoginDto,
            auth::dtos::SessionResponseDto,
            ApiResponse<auth::dtos::SessionResponseDto>,
            // Tickets
            tickets_models::TicketCategory,
            tickets_models::TicketStatus,
            tickets_dtos::SubmitTicketDto,
            tickets_dtos::ResolveTicketDto,
            tickets_dtos::TicketResponseDto,
            tickets_dtos::TrackingResponseDto,
            tickets_dtos::ReNotifyResultDto,
            ApiResponse<tickets_dtos::TicketResponseDto>,
            ApiResponse<Vec<tickets_dtos::TicketResponseDto>>,
            ApiResponse<Vec<tickets_dtos::TrackingResponseDto>>,
            ApiResponse<tickets_dtos::ReNotifyResultDto>,
            // Catalogs
            catalogs_dtos::ModelEntryDto,
            catalogs_dtos::ReplaceOptionsDto,
            ApiResponse<Vec<catalogs_dtos::ModelEntryDto>>,
            ApiResponse<Vec<String>>,
            // Metrics
            metrics_dtos::MetricsSummaryDto,
            metrics_dtos::BucketDto,
            metrics_dtos::MetricsBreakdownsDto,
            ApiResponse<metrics_dtos::MetricsSummaryDto>,
            ApiResponse<metrics_dtos::MetricsBreakdownsDto>,
            // Admin
            admin_dtos::UserAccountDto,
            ApiResponse<Vec<admin_dtos::UserAccountDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Staff login"),
        (name = "tickets", description = "Repair tickets and public tracking"),
        (name = "catalogs", description = "Reference dropdown catalogs and the model catalog"),
        (name = "metrics", description = "Repair KPIs (admin only)"),
        (name = "admin", description = "Account administration (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "RepairHub API",
        version = "0.1.0",
        description = "API documentation for RepairHub",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
