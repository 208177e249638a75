use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::models::ActorContext;
use crate::features::catalogs::dtos::{ModelEntryDto, ReplaceOptionsDto};
use crate::features::catalogs::services::{option_table, CatalogService};
use crate::shared::types::ApiResponse;

/// Selectable options of a dropdown catalog ("models", "defects", "actions",
/// "classifications", "stations")
#[utoipa::path(
    get,
    path = "/api/catalogs/{name}/options",
    params(("name" = String, Path, description = "Catalog name")),
    responses(
        (status = 200, description = "Options with placeholder first", body = ApiResponse<Vec<String>>),
        (status = 404, description = "Unknown catalog")
    ),
    security(("bearer_auth" = [])),
    tag = "catalogs"
)]
pub async fn get_options(
    _actor: ActorContext,
    State(service): State<Arc<CatalogService>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let options = if name == "models" {
        service.model_options().await
    } else {
        let table = option_table(&name)
            .ok_or_else(|| AppError::NotFound(format!("Unknown catalog '{}'", name)))?;
        service.options(table).await
    };
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// List the model catalog (model -> product name)
#[utoipa::path(
    get,
    path = "/api/catalogs/models",
    responses(
        (status = 200, description = "Model catalog entries", body = ApiResponse<Vec<ModelEntryDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "catalogs"
)]
pub async fn get_model_catalog(
    _actor: ActorContext,
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<ModelEntryDto>>>> {
    let entries = service.model_catalog().await;
    Ok(Json(ApiResponse::success(Some(entries), None, None)))
}

/// Replace a dropdown catalog in full (admin)
#[utoipa::path(
    put,
    path = "/api/catalogs/{name}",
    params(("name" = String, Path, description = "Catalog name")),
    request_body = ReplaceOptionsDto,
    responses(
        (status = 200, description = "Catalog replaced"),
        (status = 404, description = "Unknown catalog")
    ),
    security(("bearer_auth" = [])),
    tag = "catalogs"
)]
pub async fn replace_options(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Path(name): Path<String>,
    Json(dto): Json<ReplaceOptionsDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.replace_options(&name, dto.options).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Catalog '{}' updated", name)),
        None,
    )))
}

/// Replace the model catalog in full (admin)
#[utoipa::path(
    put,
    path = "/api/catalogs/models",
    request_body = Vec<ModelEntryDto>,
    responses((status = 200, description = "Model catalog replaced")),
    security(("bearer_auth" = [])),
    tag = "catalogs"
)]
pub async fn replace_model_catalog(
    RequireAdmin(_actor): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Json(entries): Json<Vec<ModelEntryDto>>,
) -> Result<Json<ApiResponse<()>>> {
    for entry in &entries {
        entry
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }
    service.replace_model_catalog(entries).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Model catalog updated".to_string()),
        None,
    )))
}
