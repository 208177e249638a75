use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::UserAccountDto;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// List account rows as stored (admin)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "All account rows", body = ApiResponse<Vec<UserAccountDto>>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<UserAccountDto>>>> {
    let users = service.list_users().await;
    Ok(Json(ApiResponse::success(Some(users), None, None)))
}

/// Replace the account table in full (admin)
#[utoipa::path(
    put,
    path = "/api/admin/users",
    tag = "admin",
    request_body = Vec<UserAccountDto>,
    responses(
        (status = 200, description = "Account table replaced"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin role required"),
        (status = 502, description = "Record store unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn replace_users(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Json(entries): Json<Vec<UserAccountDto>>,
) -> Result<Json<ApiResponse<()>>> {
    for entry in &entries {
        entry
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }
    service.replace_users(entries).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Account table updated".to_string()),
        None,
    )))
}
