use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One account row as the admin screen edits it.
///
/// Accounts live in the record store and the admin replaces the table
/// wholesale, so the DTO carries the full row both ways.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountDto {
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "Password is required"))]
    pub password: String,

    /// "admin", "user" or "technician"
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,

    #[serde(default)]
    pub station: String,
}
