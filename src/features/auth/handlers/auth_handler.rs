use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginDto, SessionResponseDto};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Log in with a credential pair from the user reference table
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Session opened", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    Json(dto): Json<LoginDto>,
) -> Result<Json<ApiResponse<SessionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(&dto.username, &dto.password).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}
