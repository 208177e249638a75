use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::metrics::dtos::{MetricsBreakdownsDto, MetricsSummaryDto};
use crate::features::metrics::services::MetricsService;
use crate::shared::types::ApiResponse;

/// Repair KPI headline numbers (admin)
#[utoipa::path(
    get,
    path = "/api/metrics/summary",
    tag = "metrics",
    responses(
        (status = 200, description = "Totals, success rate and average lead time", body = ApiResponse<MetricsSummaryDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<MetricsService>>,
) -> Result<Json<ApiResponse<MetricsSummaryDto>>> {
    let summary = service.summary().await;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Closed-ticket breakdowns by classification, defect type and day (admin)
#[utoipa::path(
    get,
    path = "/api/metrics/breakdowns",
    tag = "metrics",
    responses(
        (status = 200, description = "Grouped counts over closed tickets", body = ApiResponse<MetricsBreakdownsDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_breakdowns(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<MetricsService>>,
) -> Result<Json<ApiResponse<MetricsBreakdownsDto>>> {
    let breakdowns = service.breakdowns().await;
    Ok(Json(ApiResponse::success(Some(breakdowns), None, None)))
}
