use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One model-catalog entry: model number and the product name derived from
/// it at submit time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntryDto {
    #[validate(length(min = 1, max = 100, message = "Model is required"))]
    pub model: String,

    #[serde(default)]
    pub product: String,
}

/// Full replacement body for a single-column option list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOptionsDto {
    pub options: Vec<String>,
}
