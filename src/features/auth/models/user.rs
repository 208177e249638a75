use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::modules::sheets::SheetRow;

/// Actor role, resolved from the credential table at login.
///
/// Roles are disjoint capability sets, not a hierarchy:
/// - Reporter: create tickets, view own tickets, re-notify own tickets
/// - Technician: search tickets by SN, apply lifecycle updates
/// - Admin: view all tickets, edit reference catalogs, run aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Reporter,
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Reporter => "reporter",
            Role::Technician => "technician",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            // The legacy credential table called reporters "user"
            "reporter" | "user" => Some(Role::Reporter),
            "technician" => Some(Role::Technician),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the credential reference table.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: String,
    pub credential_secret: String,
    pub role: Role,
    pub home_station: String,
}

impl UserAccount {
    /// Parse a credential row; rows with an unknown role are dropped.
    pub fn from_row(row: &SheetRow) -> Option<Self> {
        let role = Role::parse(row.get("role"))?;
        Some(Self {
            username: row.get("username").trim().to_string(),
            credential_secret: row.get("password").trim().to_string(),
            role,
            home_station: {
                let station = row.get("station").trim();
                if station.is_empty() {
                    "General".to_string()
                } else {
                    station.to_string()
                }
            },
        })
    }
}

/// Request-scoped actor identity, carried into every core operation.
///
/// Inserted into request extensions by the session middleware; nothing in
/// the service layer reads ambient session state.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub actor_id: String,
    pub role: Role,
    pub station: String,
}

impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActorContext>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" Technician "), Some(Role::Technician));
        assert_eq!(Role::parse("user"), Some(Role::Reporter));
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_user_account_from_row_defaults_station() {
        let mut cells = HashMap::new();
        cells.insert("username".to_string(), " somchai ".to_string());
        cells.insert("password".to_string(), "secret".to_string());
        cells.insert("role".to_string(), "user".to_string());
        let account = UserAccount::from_row(&SheetRow::new(1, cells)).unwrap();
        assert_eq!(account.username, "somchai");
        assert_eq!(account.role, Role::Reporter);
        assert_eq!(account.home_station, "General");
    }
}
