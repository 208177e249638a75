use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::auth::guards::{RequireAdmin, RequireReporter, RequireTechnician};
use crate::features::tickets::dtos::{
    ReNotifyResultDto, ResolveTicketDto, SerialQuery, SubmitTicketDto, TicketResponseDto,
    TicketSearchQuery, TrackQuery, TrackingResponseDto,
};
use crate::features::tickets::services::TicketService;
use crate::shared::types::ApiResponse;

/// Largest raw upload accepted per image field
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Multipart body shared by submit and resolve: one `payload` JSON field
/// plus any number of `images` file fields, in order.
async fn read_ticket_form<T: serde::de::DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<(T, Vec<Vec<u8>>), AppError> {
    let mut payload: Option<T> = None;
    let mut images: Vec<Vec<u8>> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "payload" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read payload field: {}", e))
                })?;
                payload = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("Invalid payload JSON: {}", e))
                })?);
            }
            "images" | "image" => {
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;
                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image too large. Maximum size is {} MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }
                images.push(data.to_vec());
            }
            other => {
                debug!("Ignoring unknown field: {}", other);
            }
        }
    }

    let payload =
        payload.ok_or_else(|| AppError::BadRequest("Payload field is required".to_string()))?;
    Ok((payload, images))
}

fn skipped_message(skipped: usize) -> Option<String> {
    (skipped > 0).then(|| {
        format!(
            "{} image(s) were not stored because the attachment budget was reached",
            skipped
        )
    })
}

/// Submit a new repair ticket (reporter)
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = "tickets",
    request_body(
        content = SubmitTicketDto,
        content_type = "multipart/form-data",
        description = "Ticket fields as a `payload` JSON part plus optional `images` file parts"
    ),
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<TicketResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Reporter role required"),
        (status = 502, description = "Record store unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_ticket(
    RequireReporter(actor): RequireReporter,
    State(service): State<Arc<TicketService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<TicketResponseDto>>), AppError> {
    let (dto, images) = read_ticket_form::<SubmitTicketDto>(multipart).await?;
    let (ticket, skipped) = service.submit(&actor, dto, images).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ticket),
            skipped_message(skipped),
            None,
        )),
    ))
}

/// Apply a technician lifecycle update
#[utoipa::path(
    put,
    path = "/api/tickets/{position}",
    tag = "tickets",
    params(("position" = u32, Path, description = "Ticket position")),
    request_body(
        content = ResolveTicketDto,
        content_type = "multipart/form-data",
        description = "Update fields as a `payload` JSON part plus optional `images` file parts"
    ),
    responses(
        (status = 200, description = "Ticket updated", body = ApiResponse<TicketResponseDto>),
        (status = 400, description = "Invalid transition or missing repair details"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Technician role required"),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Ticket changed by someone else"),
        (status = 502, description = "Record store unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn resolve_ticket(
    RequireTechnician(actor): RequireTechnician,
    Path(position): Path<u32>,
    State(service): State<Arc<TicketService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<TicketResponseDto>>, AppError> {
    let (dto, images) = read_ticket_form::<ResolveTicketDto>(multipart).await?;
    let (ticket, skipped) = service.resolve(&actor, position, dto, images).await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        skipped_message(skipped),
        None,
    )))
}

/// Push a reminder for an open ticket (reporter, rate limited)
#[utoipa::path(
    post,
    path = "/api/tickets/{position}/notify",
    tag = "tickets",
    params(("position" = u32, Path, description = "Ticket position")),
    responses(
        (status = 200, description = "Delivery attempted", body = ApiResponse<ReNotifyResultDto>),
        (status = 400, description = "Ticket already closed"),
        (status = 403, description = "Not the ticket's reporter"),
        (status = 404, description = "Ticket not found"),
        (status = 429, description = "Re-notify cooldown active")
    ),
    security(("bearer_auth" = []))
)]
pub async fn re_notify_ticket(
    RequireReporter(actor): RequireReporter,
    Path(position): Path<u32>,
    State(service): State<Arc<TicketService>>,
) -> Result<Json<ApiResponse<ReNotifyResultDto>>, AppError> {
    let result = service.re_notify(&actor, position).await?;
    let message = if result.delivered {
        "Reminder sent"
    } else {
        "Reminder could not be delivered"
    };
    Ok(Json(ApiResponse::success(
        Some(result),
        Some(message.to_string()),
        None,
    )))
}

/// The caller's own tickets, newest first (reporter)
#[utoipa::path(
    get,
    path = "/api/tickets/mine",
    tag = "tickets",
    params(TicketSearchQuery),
    responses(
        (status = 200, description = "Tickets submitted by the caller", body = ApiResponse<Vec<TicketResponseDto>>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_tickets(
    RequireReporter(actor): RequireReporter,
    State(service): State<Arc<TicketService>>,
    Query(query): Query<TicketSearchQuery>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>, AppError> {
    let tickets = service
        .list_for_reporter(&actor, query.q.as_deref())
        .await;
    Ok(Json(ApiResponse::success(Some(tickets), None, None)))
}

/// Every job recorded for one serial number (technician)
#[utoipa::path(
    get,
    path = "/api/tickets/by-serial",
    tag = "tickets",
    params(SerialQuery),
    responses(
        (status = 200, description = "Tickets for the serial number, oldest first", body = ApiResponse<Vec<TicketResponseDto>>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_by_serial(
    RequireTechnician(_actor): RequireTechnician,
    State(service): State<Arc<TicketService>>,
    Query(query): Query<SerialQuery>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>, AppError> {
    let tickets = service.search_by_serial(&query.sn).await;
    Ok(Json(ApiResponse::success(Some(tickets), None, None)))
}

/// All tickets, newest first, capped (admin)
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = "tickets",
    params(TicketSearchQuery),
    responses(
        (status = 200, description = "Most recent tickets", body = ApiResponse<Vec<TicketResponseDto>>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_all_tickets(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<TicketService>>,
    Query(query): Query<TicketSearchQuery>,
) -> Result<Json<ApiResponse<Vec<TicketResponseDto>>>, AppError> {
    let tickets = service.list_all(query.q.as_deref()).await;
    Ok(Json(ApiResponse::success(Some(tickets), None, None)))
}

/// Public status tracking, no authentication
#[utoipa::path(
    get,
    path = "/api/track",
    tag = "tickets",
    params(TrackQuery),
    responses(
        (status = 200, description = "Status of the last matching tickets", body = ApiResponse<Vec<TrackingResponseDto>>),
    )
)]
pub async fn track_tickets(
    State(service): State<Arc<TicketService>>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<ApiResponse<Vec<TrackingResponseDto>>>, AppError> {
    let tickets = service
        .track(
            query.q.as_deref().unwrap_or(""),
            query.model.as_deref().unwrap_or(""),
        )
        .await;
    Ok(Json(ApiResponse::success(Some(tickets), None, None)))
}
